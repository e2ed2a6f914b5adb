// tests/alerts_rank.rs
//
// Ordering, exclusion and stability of the alert ranking pipeline.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use flood_watch::alerts::{
    fetch_ranked_alerts, rank_alerts, Alert, AlertProperties, AlertSource, MAX_SCORE,
};

fn alert(
    id: &str,
    event: &str,
    sev: &str,
    urg: &str,
    cert: &str,
    sent: Option<&str>,
) -> Alert {
    let mut a = Alert::from_properties(AlertProperties {
        event: Some(event.into()),
        severity: Some(sev.into()),
        urgency: Some(urg.into()),
        certainty: Some(cert.into()),
        status: Some("Actual".into()),
        sent: sent.map(str::to_string),
        ..Default::default()
    });
    a.rest.insert("id".into(), serde_json::Value::String(id.into()));
    a
}

fn ids(ranked: &[flood_watch::alerts::ScoredAlert]) -> Vec<String> {
    ranked
        .iter()
        .map(|s| s.alert.rest["id"].as_str().unwrap().to_string())
        .collect()
}

const T1: &str = "2024-10-15T10:00:00Z";
const T2: &str = "2024-10-15T12:00:00Z";

#[test]
fn higher_score_first_then_newer_first() {
    // A: 2+2+1 = 5 @ t1; B: 3+3+2 = 8 @ t2; C: 3+3+2 = 8 @ t1 (t1 < t2)
    let raw = vec![
        alert("A", "Flood Watch", "Moderate", "Expected", "Possible", Some(T1)),
        alert("B", "Flood Warning", "Severe", "Immediate", "Likely", Some(T2)),
        alert("C", "Flash Flood Warning", "Severe", "Immediate", "Likely", Some(T1)),
    ];
    let ranked = rank_alerts(&raw);
    assert_eq!(ids(&ranked), vec!["B", "C", "A"]);
    assert_eq!(
        ranked.iter().map(|s| s.score).collect::<Vec<_>>(),
        vec![8, 8, 5]
    );
}

#[test]
fn test_status_and_unknown_severity_never_survive() {
    let mut test_alert = alert("T", "Flood Warning", "Extreme", "Immediate", "Observed", Some(T2));
    test_alert.properties.status = Some("Test".into());
    let unknown = alert("U", "Flood Warning", "Unknown", "Immediate", "Observed", Some(T2));
    let kept = alert("K", "Flood Warning", "Minor", "Future", "Possible", Some(T1));

    let ranked = rank_alerts(&[test_alert, unknown, kept]);
    assert_eq!(ids(&ranked), vec!["K"]);
}

#[test]
fn irrelevant_events_are_dropped() {
    let raw = vec![
        alert("H", "Excessive Heat Warning", "Extreme", "Immediate", "Observed", Some(T2)),
        alert("W", "Wind Advisory", "Moderate", "Expected", "Likely", Some(T2)),
        alert("R", "Heavy Rain Advisory", "Minor", "Expected", "Likely", Some(T1)),
    ];
    assert_eq!(ids(&rank_alerts(&raw)), vec!["R"]);
}

#[test]
fn equal_score_and_sent_keep_input_order() {
    let raw = vec![
        alert("first", "Flood Warning", "Severe", "Expected", "Likely", Some(T1)),
        alert("second", "Storm Warning", "Severe", "Expected", "Likely", Some(T1)),
        alert("third", "Rain Statement", "Severe", "Expected", "Likely", Some(T1)),
    ];
    assert_eq!(ids(&rank_alerts(&raw)), vec!["first", "second", "third"]);
}

#[test]
fn missing_or_malformed_sent_sorts_last_among_equals() {
    let raw = vec![
        alert("nosent", "Flood Warning", "Severe", "Expected", "Likely", None),
        alert("garbage", "Flood Warning", "Severe", "Expected", "Likely", Some("n/a")),
        alert("dated", "Flood Warning", "Severe", "Expected", "Likely", Some(T1)),
        alert("top", "Flood Warning", "Extreme", "Immediate", "Observed", None),
    ];
    assert_eq!(
        ids(&rank_alerts(&raw)),
        vec!["top", "dated", "nosent", "garbage"]
    );
}

#[test]
fn sent_comparison_uses_instants_not_text() {
    // 10:00-05:00 is 15:00Z, later than 12:00Z
    let raw = vec![
        alert("utc", "Flood Warning", "Severe", "Expected", "Likely", Some(T2)),
        alert("cdt", "Flood Warning", "Severe", "Expected", "Likely", Some("2024-10-15T10:00:00-05:00")),
    ];
    assert_eq!(ids(&rank_alerts(&raw)), vec!["cdt", "utc"]);
}

#[test]
fn scores_stay_in_range_and_unknown_labels_count_zero() {
    let raw = vec![
        alert("max", "Flood Warning", "Extreme", "Immediate", "Observed", Some(T1)),
        alert("odd", "Flood Warning", "Minor", "Whenever", "Maybe", Some(T1)),
    ];
    let ranked = rank_alerts(&raw);
    assert_eq!(ranked[0].score, MAX_SCORE);
    assert_eq!(ranked[1].score, 1);
}

#[test]
fn scored_alert_serializes_feature_plus_score() {
    let raw = vec![alert("x", "Flood Warning", "Severe", "Immediate", "Observed", Some(T1))];
    let ranked = rank_alerts(&raw);
    let v = serde_json::to_value(&ranked[0]).unwrap();
    assert_eq!(v["id"], "x");
    assert_eq!(v["score"], 9);
    assert_eq!(v["properties"]["event"], "Flood Warning");
    assert_eq!(v["properties"]["severity"], "Severe");
}

struct FailingSource;

#[async_trait]
impl AlertSource for FailingSource {
    async fn fetch_active(&self) -> Result<Vec<Alert>> {
        Err(anyhow!("connection refused"))
    }
    fn name(&self) -> &'static str {
        "Failing"
    }
}

struct EmptySource;

#[async_trait]
impl AlertSource for EmptySource {
    async fn fetch_active(&self) -> Result<Vec<Alert>> {
        Ok(Vec::new())
    }
    fn name(&self) -> &'static str {
        "Empty"
    }
}

#[tokio::test]
async fn source_failure_yields_empty_list() {
    assert!(fetch_ranked_alerts(&FailingSource).await.is_empty());
}

#[tokio::test]
async fn zero_alerts_yields_empty_list() {
    assert!(fetch_ranked_alerts(&EmptySource).await.is_empty());
}
