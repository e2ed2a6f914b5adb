//! Priority scoring for weather alerts.
//!
//! `ScoreInputs` are the three CAP classification signals of an alert:
//! - `severity`  : Extreme 4, Severe 3, Moderate 2, Minor 1, Unknown 0
//! - `urgency`   : Immediate 3, Expected 2, Future 1, Unknown 0
//! - `certainty` : Observed 3, Likely 2, Possible 1, Unknown 0
//!
//! Score = sum of the three contributions. Missing or unrecognized values add 0,
//! so the result always lies in `0..=MAX_SCORE`.

use super::types::{AlertProperties, Certainty, Severity, Urgency};

pub const MAX_SCORE: u8 = 10;

/// Borrowed classification triple. Any part may be absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreInputs<'a> {
    pub severity: Option<&'a Severity>,
    pub urgency: Option<&'a Urgency>,
    pub certainty: Option<&'a Certainty>,
}

impl<'a> ScoreInputs<'a> {
    pub fn new(
        severity: Option<&'a Severity>,
        urgency: Option<&'a Urgency>,
        certainty: Option<&'a Certainty>,
    ) -> Self {
        Self {
            severity,
            urgency,
            certainty,
        }
    }

    pub fn from_properties(p: &'a AlertProperties) -> Self {
        Self::new(p.severity.as_ref(), p.urgency.as_ref(), p.certainty.as_ref())
    }
}

/// Compute the priority score of an alert.
pub fn alert_score(inputs: &ScoreInputs<'_>) -> u8 {
    inputs.severity.map_or(0, Severity::points)
        + inputs.urgency.map_or(0, Urgency::points)
        + inputs.certainty.map_or(0, Certainty::points)
}
