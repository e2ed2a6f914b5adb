//! Alert ranking: exclusion → relevance → scoring → ordering.
//!
//! Ordering is score descending, then `sent` descending (newest first). Alerts
//! without a parseable `sent` sort after every dated alert of the same score.
//! `sort_by` is stable, so full ties keep their input order.

use std::cmp::Ordering;

use super::relevance::EventMatch;
use super::scoring::{alert_score, ScoreInputs};
use super::types::{Alert, ScoredAlert, Severity};

/// Simulated alerts and alerts of unknown severity never make the list.
pub fn is_excluded(alert: &Alert) -> bool {
    alert.is_test() || alert.properties.severity == Some(Severity::Unknown)
}

/// Filter, score and order a raw batch of alerts. The input is left untouched.
pub fn rank_alerts(raw: &[Alert]) -> Vec<ScoredAlert> {
    let mut ranked: Vec<(ScoredAlert, Option<i64>)> = raw
        .iter()
        .filter(|a| !is_excluded(a))
        .filter(|a| {
            let hit = EventMatch::of(a.event());
            if hit.is_relevant() {
                tracing::trace!(
                    target: "alerts",
                    event = a.event().unwrap_or_default(),
                    groups = %hit.labels(),
                    "relevant alert"
                );
            }
            hit.is_relevant()
        })
        .map(|a| {
            let score = alert_score(&ScoreInputs::from_properties(&a.properties));
            let sent = a.sent_at().map(|dt| dt.timestamp_millis());
            (
                ScoredAlert {
                    alert: a.clone(),
                    score,
                },
                sent,
            )
        })
        .collect();

    ranked.sort_by(|(a, a_sent), (b, b_sent)| by_priority(a.score, *a_sent, b.score, *b_sent));

    ranked.into_iter().map(|(scored, _)| scored).collect()
}

fn by_priority(a_score: u8, a_sent: Option<i64>, b_score: u8, b_sent: Option<i64>) -> Ordering {
    // Option orders None < Some, so comparing b to a puts undated alerts last.
    b_score.cmp(&a_score).then_with(|| b_sent.cmp(&a_sent))
}
