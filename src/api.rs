use std::any::Any;
use std::sync::Arc;

use axum::{extract::State, response::Response, routing::get, Json, Router};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::alerts::nws::NwsAlertSource;
use crate::alerts::{fetch_ranked_alerts, AlertSource, ScoredAlert};
use crate::config::{AppConfig, NewsProviderKind};
use crate::error::{internal_error_response, ApiError};
use crate::news::providers::{GNewsProvider, GNewsQuery, GoogleNewsRssProvider};
use crate::news::types::{ArticleSource, NewsRanking};
use crate::news::fetch_ranked_news;
use crate::ranking::{build_assistant, RankingAssistant};

/// Per-process adapters. Immutable; every request builds its own data.
#[derive(Clone)]
pub struct AppState {
    pub alerts: Arc<dyn AlertSource>,
    pub news: Arc<dyn ArticleSource>,
    pub assistant: Arc<dyn RankingAssistant>,
}

impl AppState {
    pub fn new(
        alerts: Arc<dyn AlertSource>,
        news: Arc<dyn ArticleSource>,
        assistant: Arc<dyn RankingAssistant>,
    ) -> Self {
        Self {
            alerts,
            news,
            assistant,
        }
    }

    /// Wire live HTTP adapters from config.
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let http = cfg.http.build_client()?;

        let alerts: Arc<dyn AlertSource> =
            Arc::new(NwsAlertSource::from_url(cfg.alerts.url.clone(), http.clone()));

        let news: Arc<dyn ArticleSource> = match cfg.news.provider {
            NewsProviderKind::Gnews => Arc::new(GNewsProvider::from_url(
                cfg.news.gnews_url.clone(),
                cfg.news.gnews_api_key.clone(),
                GNewsQuery {
                    q: cfg.news.query.clone(),
                    country: cfg.news.country.clone(),
                    lang: cfg.news.lang.clone(),
                },
                http.clone(),
            )),
            NewsProviderKind::GoogleRss => Arc::new(GoogleNewsRssProvider::from_url(
                cfg.news.rss_url.clone(),
                http.clone(),
            )),
        };

        let assistant = build_assistant(&cfg.ai, http);
        tracing::info!(
            alerts = alerts.name(),
            news = news.name(),
            assistant = assistant.provider_name(),
            "adapters wired"
        );

        Ok(Self::new(alerts, news, assistant))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/nws", get(nws_alerts))
        .route("/api/news", get(news))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");
    internal_error_response()
}

#[derive(serde::Serialize)]
struct AlertsResp {
    alerts: Vec<ScoredAlert>,
}

async fn nws_alerts(State(state): State<AppState>) -> Json<AlertsResp> {
    let alerts = fetch_ranked_alerts(state.alerts.as_ref()).await;
    Json(AlertsResp { alerts })
}

async fn news(State(state): State<AppState>) -> Result<Json<NewsRanking>, ApiError> {
    let ranking = fetch_ranked_news(state.news.as_ref(), state.assistant.as_ref()).await?;
    Ok(Json(ranking))
}
