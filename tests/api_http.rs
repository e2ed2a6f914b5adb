// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/nws   (ranked alerts, empty on source failure)
// - GET /api/news  (articles + indices, null/null on bad reply)
// - panic inside a handler -> 500 with the fixed error body
// - CORS header on responses

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use flood_watch::alerts::nws::NwsAlertSource;
use flood_watch::alerts::{Alert, AlertSource};
use flood_watch::news::providers::GNewsProvider;
use flood_watch::news::types::ArticleSource;
use flood_watch::ranking::{MockAssistant, RankingAssistant};
use flood_watch::{router, AppState, PUBLIC_ERROR_MESSAGE};

const BODY_LIMIT: usize = 1024 * 1024;
const NWS: &str = include_str!("fixtures/nws_alerts.json");
const GNEWS: &str = include_str!("fixtures/gnews_search.json");

fn app_with(
    alerts: Arc<dyn AlertSource>,
    news: Arc<dyn ArticleSource>,
    assistant: Arc<dyn RankingAssistant>,
) -> Router {
    router(AppState::new(alerts, news, assistant))
}

fn fixture_app(reply: &str) -> Router {
    app_with(
        Arc::new(NwsAlertSource::from_fixture_str(NWS)),
        Arc::new(GNewsProvider::from_fixture_str(GNEWS)),
        Arc::new(MockAssistant::new(reply)),
    )
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Json) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .header("origin", "https://dashboard.example")
        .body(Body::empty())
        .expect("build request");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let v = serde_json::from_slice(&bytes).unwrap_or(Json::String(
        String::from_utf8_lossy(&bytes).into_owned(),
    ));
    (status, headers, v)
}

#[tokio::test]
async fn health_returns_ok() {
    let (status, _, body) = get(fixture_app("[0]"), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Json::String("ok".into()));
}

#[tokio::test]
async fn nws_returns_ranked_alerts_with_scores() {
    let (status, headers, v) = get(fixture_app("[0]"), "/api/nws").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        headers.contains_key("access-control-allow-origin"),
        "CORS must allow any origin"
    );

    let alerts = v["alerts"].as_array().expect("alerts array");
    assert_eq!(alerts.len(), 5);
    assert_eq!(alerts[0]["properties"]["event"], "Flash Flood Warning");
    assert_eq!(alerts[0]["score"], 10);
    assert!(alerts
        .iter()
        .all(|a| a["properties"]["status"] != "Test" && a["properties"]["severity"] != "Unknown"));
}

struct Unreachable;

#[async_trait]
impl AlertSource for Unreachable {
    async fn fetch_active(&self) -> Result<Vec<Alert>> {
        Err(anyhow::anyhow!("connect timeout"))
    }
    fn name(&self) -> &'static str {
        "Unreachable"
    }
}

#[tokio::test]
async fn nws_source_failure_is_empty_not_500() {
    let app = app_with(
        Arc::new(Unreachable),
        Arc::new(GNewsProvider::from_fixture_str(GNEWS)),
        Arc::new(MockAssistant::new("[0]")),
    );
    let (status, _, v) = get(app, "/api/nws").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v, serde_json::json!({ "alerts": [] }));
}

#[tokio::test]
async fn nws_zero_alerts_is_empty_list() {
    let app = app_with(
        Arc::new(NwsAlertSource::from_fixture_str(
            r#"{"type":"FeatureCollection","features":[]}"#,
        )),
        Arc::new(GNewsProvider::from_fixture_str(GNEWS)),
        Arc::new(MockAssistant::new("[0]")),
    );
    let (status, _, v) = get(app, "/api/nws").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v, serde_json::json!({ "alerts": [] }));
}

#[tokio::test]
async fn news_returns_articles_and_indices() {
    let (status, _, v) = get(fixture_app("```json\n[1, 0]\n```"), "/api/news").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["indices"], serde_json::json!([1, 0]));
    let articles = v["articles"].as_array().expect("articles array");
    assert_eq!(articles.len(), 3);
    assert_eq!(articles[1]["source"], "River Daily");
}

#[tokio::test]
async fn news_unparseable_reply_is_null_null() {
    let (status, _, v) = get(fixture_app("Sorry, I can't help with that."), "/api/news").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v, serde_json::json!({ "articles": null, "indices": null }));
}

struct Exploding;

#[async_trait]
impl ArticleSource for Exploding {
    async fn fetch_candidates(&self) -> Result<Vec<flood_watch::news::types::Article>> {
        panic!("secret internal detail");
    }
    fn name(&self) -> &'static str {
        "Exploding"
    }
}

#[tokio::test]
async fn handler_panic_is_generic_500() {
    let app = app_with(
        Arc::new(NwsAlertSource::from_fixture_str(NWS)),
        Arc::new(Exploding),
        Arc::new(MockAssistant::new("[0]")),
    );
    let (status, _, v) = get(app, "/api/news").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(v, serde_json::json!({ "error": PUBLIC_ERROR_MESSAGE }));
    assert!(!v.to_string().contains("secret"));
}
