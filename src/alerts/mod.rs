// src/alerts/mod.rs
//! Weather alert pipeline: fetch → exclude → relevance → score → sort.

pub mod nws;
pub mod rank;
pub mod relevance;
pub mod scoring;
pub mod types;

use metrics::counter;

pub use crate::alerts::rank::{is_excluded, rank_alerts};
pub use crate::alerts::relevance::{is_relevant_event, EventMatch, KeywordGroup};
pub use crate::alerts::scoring::{alert_score, ScoreInputs, MAX_SCORE};
pub use crate::alerts::types::{
    Alert, AlertProperties, AlertSource, Certainty, ScoredAlert, Severity, Urgency,
};

/// Fetch active alerts and rank them, best effort.
///
/// Any source failure is logged and turned into an empty list. An empty result
/// therefore means "nothing available right now", not "no alerts exist".
pub async fn fetch_ranked_alerts(source: &dyn AlertSource) -> Vec<ScoredAlert> {
    let raw = match source.fetch_active().await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(target: "alerts", error = ?e, source = source.name(), "alert source error");
            counter!("alerts_source_errors_total").increment(1);
            return Vec::new();
        }
    };

    let ranked = rank_alerts(&raw);

    tracing::info!(
        target: "alerts",
        total = raw.len(),
        relevant = ranked.len(),
        source = source.name(),
        "ranked alerts"
    );
    for item in &ranked {
        tracing::debug!(
            target: "alerts",
            event = item.alert.event().unwrap_or_default(),
            score = item.score,
            "ranked alert"
        );
    }
    counter!("alerts_ranked_total").increment(ranked.len() as u64);

    ranked
}
