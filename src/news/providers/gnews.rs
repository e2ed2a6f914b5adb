// src/news/providers/gnews.rs
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::news::normalize_title;
use crate::news::types::{Article, ArticleSource};

pub const DEFAULT_GNEWS_URL: &str = "https://gnews.io/api/v4/search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    articles: Vec<Item>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Item {
    title: Option<String>,
    url: Option<String>,
    image: Option<String>,
    published_at: Option<String>,
    source: Option<ItemSource>,
}

#[derive(Debug, Deserialize)]
struct ItemSource {
    name: Option<String>,
}

/// Search query sent to GNews.
#[derive(Debug, Clone)]
pub struct GNewsQuery {
    pub q: String,
    pub country: String,
    pub lang: String,
}

impl Default for GNewsQuery {
    fn default() -> Self {
        Self {
            q: "flood".into(),
            country: "us".into(),
            lang: "en".into(),
        }
    }
}

/// GNews search API (`/api/v4/search`) source.
pub struct GNewsProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http {
        url: String,
        api_key: String,
        query: GNewsQuery,
        client: reqwest::Client,
    },
}

impl GNewsProvider {
    pub fn from_fixture_str(body: &str) -> Self {
        Self {
            mode: Mode::Fixture(body.to_string()),
        }
    }

    pub fn from_url(
        url: impl Into<String>,
        api_key: impl Into<String>,
        query: GNewsQuery,
        client: reqwest::Client,
    ) -> Self {
        Self {
            mode: Mode::Http {
                url: url.into(),
                api_key: api_key.into(),
                query,
                client,
            },
        }
    }

    pub fn parse_search_response(body: &str) -> Result<Vec<Article>> {
        let t0 = std::time::Instant::now();
        let resp: SearchResponse = serde_json::from_str(body).context("parsing gnews json")?;

        let mut out = Vec::with_capacity(resp.articles.len());
        for it in resp.articles {
            let title = normalize_title(it.title.as_deref().unwrap_or_default());
            let url = it.url.unwrap_or_default();
            if title.is_empty() || url.is_empty() {
                continue;
            }
            out.push(Article {
                title,
                url,
                published_at: it.published_at.unwrap_or_default(),
                source: it.source.and_then(|s| s.name).unwrap_or_default(),
                image: it.image.filter(|s| !s.is_empty()),
            });
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("news_parse_ms").record(ms);
        counter!("news_candidates_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl ArticleSource for GNewsProvider {
    async fn fetch_candidates(&self) -> Result<Vec<Article>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_search_response(s),
            Mode::Http {
                url,
                api_key,
                query,
                client,
            } => {
                if api_key.is_empty() {
                    bail!("GNEWS_API_KEY is not configured");
                }
                let body = client
                    .get(url.as_str())
                    .query(&[
                        ("q", query.q.as_str()),
                        ("country", query.country.as_str()),
                        ("lang", query.lang.as_str()),
                        ("token", api_key.as_str()),
                    ])
                    .send()
                    .await
                    .map_err(reqwest::Error::without_url)
                    .context("gnews http get()")?
                    .error_for_status()
                    .map_err(reqwest::Error::without_url)
                    .context("gnews http status")?
                    .text()
                    .await
                    .map_err(reqwest::Error::without_url)
                    .context("gnews http .text()")?;
                Self::parse_search_response(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "GNews"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let p = GNewsProvider::from_url(
            "http://127.0.0.1:9/never",
            "",
            GNewsQuery::default(),
            reqwest::Client::new(),
        );
        let err = p.fetch_candidates().await.unwrap_err();
        assert!(err.to_string().contains("GNEWS_API_KEY"));
    }

    /// One-shot HTTP server that answers every request with a bare 401.
    async fn unauthorized_responder() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = sock.read(&mut buf).await;
            let _ = sock
                .write_all(
                    b"HTTP/1.1 401 Unauthorized\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                )
                .await;
        });
        format!("http://{addr}/api/v4/search")
    }

    #[tokio::test]
    async fn rejected_token_is_not_echoed_in_the_error() {
        let url = unauthorized_responder().await;
        let p = GNewsProvider::from_url(
            url,
            "SECRET_TOKEN_123",
            GNewsQuery::default(),
            reqwest::Client::new(),
        );
        let err = p.fetch_candidates().await.unwrap_err();
        let dbg = format!("{err:?}");
        assert!(dbg.contains("401"), "{dbg}");
        assert!(!dbg.contains("SECRET_TOKEN_123"), "{dbg}");
    }

    #[tokio::test]
    async fn unreachable_host_error_does_not_carry_the_token() {
        let p = GNewsProvider::from_url(
            "http://127.0.0.1:9/api/v4/search",
            "SECRET_TOKEN_123",
            GNewsQuery::default(),
            reqwest::Client::new(),
        );
        let err = p.fetch_candidates().await.unwrap_err();
        assert!(!format!("{err:?}").contains("SECRET_TOKEN_123"));
    }

    #[test]
    fn error_payload_without_articles_is_rejected() {
        let body = r#"{"errors":["You did not provide an API key."]}"#;
        assert!(GNewsProvider::parse_search_response(body).is_err());
    }
}
