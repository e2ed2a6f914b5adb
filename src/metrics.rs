use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("alerts_fetched_total", "Alert features parsed from the NWS response.");
        describe_counter!("alerts_ranked_total", "Alerts returned after exclusion and relevance filtering.");
        describe_counter!("alerts_source_errors_total", "Alert source fetch/parse errors.");
        describe_counter!("news_candidates_total", "News candidates parsed from the article source.");
        describe_counter!("news_source_errors_total", "Article source fetch/parse errors.");
        describe_counter!("ranking_assistant_errors_total", "Failed ranking assistant calls.");
        describe_counter!(
            "ranking_unparseable_total",
            "Ranking replies without a usable index array."
        );
        describe_histogram!("alerts_parse_ms", "NWS response parse time in milliseconds.");
        describe_histogram!("news_parse_ms", "Article source parse time in milliseconds.");
        describe_histogram!("ranking_latency_ms", "Ranking assistant round-trip in milliseconds.");
    });
}

impl Metrics {
    /// Install the global Prometheus recorder. Call once per process.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
