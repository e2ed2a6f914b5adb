// src/alerts/nws.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::alerts::types::{Alert, AlertSource};

/// Active alerts, nationwide.
pub const DEFAULT_NWS_ALERTS_URL: &str = "https://api.weather.gov/alerts/active";

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Alert>,
}

/// National Weather Service `alerts/active` source.
pub struct NwsAlertSource {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl NwsAlertSource {
    /// Serve a canned GeoJSON body (tests, local runs without network).
    pub fn from_fixture_str(body: &str) -> Self {
        Self {
            mode: Mode::Fixture(body.to_string()),
        }
    }

    /// NWS rejects requests without a User-Agent; set one on `client`.
    pub fn from_url(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            mode: Mode::Http {
                url: url.into(),
                client,
            },
        }
    }

    pub fn parse_feature_collection(body: &str) -> Result<Vec<Alert>> {
        let t0 = std::time::Instant::now();
        let fc: FeatureCollection =
            serde_json::from_str(body).context("parsing nws alerts geojson")?;

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("alerts_parse_ms").record(ms);
        counter!("alerts_fetched_total").increment(fc.features.len() as u64);
        Ok(fc.features)
    }
}

#[async_trait]
impl AlertSource for NwsAlertSource {
    async fn fetch_active(&self) -> Result<Vec<Alert>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_feature_collection(s),
            Mode::Http { url, client } => {
                let body = client
                    .get(url.as_str())
                    .header(ACCEPT, "application/geo+json")
                    .send()
                    .await
                    .context("nws http get()")?
                    .error_for_status()
                    .context("nws http status")?
                    .text()
                    .await
                    .context("nws http .text()")?;
                Self::parse_feature_collection(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "NWS"
    }
}
