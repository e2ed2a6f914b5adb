// src/alerts/types.rs
//! Alert model (NWS GeoJSON feature) and the alert source abstraction.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Generates a closed CAP classification enum with a verbatim catch-all.
///
/// Labels match case-sensitively, the same way the NWS API spells them. Anything
/// else lands in `Other` so it survives the round trip to the dashboard.
macro_rules! classification {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $points:expr),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Label outside the known value set. Scores 0.
            Other(String),
        }

        impl $name {
            /// Contribution of this value to an alert's priority score.
            pub fn points(&self) -> u8 {
                match self {
                    $(Self::$variant => $points,)+
                    Self::Other(_) => 0,
                }
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                    Self::Other(label) => label.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                $(
                    if label == stringify!($variant) {
                        return Self::$variant;
                    }
                )+
                Self::Other(label)
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                Self::from(label.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                match value {
                    $name::Other(label) => label,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

classification! {
    /// How bad the hazard is.
    Severity {
        Extreme => 4,
        Severe => 3,
        Moderate => 2,
        Minor => 1,
        Unknown => 0,
    }
}

classification! {
    /// How soon responsive action should be taken.
    Urgency {
        Immediate => 3,
        Expected => 2,
        Future => 1,
        Unknown => 0,
    }
}

classification! {
    /// How confident the issuer is that the hazard will occur.
    Certainty {
        Observed => 3,
        Likely => 2,
        Possible => 1,
        Unknown => 0,
    }
}

/// Status value NWS uses for simulated alerts.
pub const TEST_STATUS: &str = "Test";

/// The `properties` object of an NWS alert feature.
///
/// Only the fields the ranking reads are typed; the rest (headline, areaDesc,
/// description, ...) ride along in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertProperties {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub certainty: Option<Certainty>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sent: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One weather-service advisory, as a GeoJSON feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub properties: AlertProperties,
    /// `id`, `type`, `geometry` and anything else on the feature.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Alert {
    pub fn from_properties(properties: AlertProperties) -> Self {
        Self {
            properties,
            rest: Map::new(),
        }
    }

    pub fn event(&self) -> Option<&str> {
        self.properties.event.as_deref()
    }

    pub fn is_test(&self) -> bool {
        self.properties.status.as_deref() == Some(TEST_STATUS)
    }

    /// Parsed `sent` timestamp. Missing or malformed values yield `None`.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.properties
            .sent
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// An alert that survived filtering, with its priority score attached.
/// Serializes as the original feature plus a top-level `score`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredAlert {
    #[serde(flatten)]
    pub alert: Alert,
    pub score: u8,
}

/// Where active alerts come from.
#[async_trait::async_trait]
pub trait AlertSource: Send + Sync {
    async fn fetch_active(&self) -> Result<Vec<Alert>>;
    fn name(&self) -> &'static str;
}
