//! Keyword relevance for alert event names.
//!
//! Two groups are kept apart even though the current policy simply ORs them,
//! so flood matches can be weighted separately later.

/// Precipitation and storm systems.
pub const RAIN_KEYWORDS: &[&str] = &["rain", "storm"];
/// Flooding proper (flood, flash flood, coastal flood, ...).
pub const FLOOD_KEYWORDS: &[&str] = &["flood"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeywordGroup {
    Rain,
    Flood,
}

impl KeywordGroup {
    pub const ALL: [KeywordGroup; 2] = [KeywordGroup::Rain, KeywordGroup::Flood];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            KeywordGroup::Rain => RAIN_KEYWORDS,
            KeywordGroup::Flood => FLOOD_KEYWORDS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeywordGroup::Rain => "rain",
            KeywordGroup::Flood => "flood",
        }
    }

    /// Case-insensitive substring test against this group's keywords.
    pub fn matches(self, lowered: &str) -> bool {
        self.keywords().iter().any(|kw| lowered.contains(kw))
    }
}

/// Which keyword groups an event name hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventMatch {
    pub rain: bool,
    pub flood: bool,
}

impl EventMatch {
    pub fn of(event: Option<&str>) -> Self {
        let Some(event) = event.filter(|e| !e.trim().is_empty()) else {
            return Self::default();
        };
        let lowered = event.to_lowercase();
        Self {
            rain: KeywordGroup::Rain.matches(&lowered),
            flood: KeywordGroup::Flood.matches(&lowered),
        }
    }

    pub fn is_relevant(&self) -> bool {
        self.rain || self.flood
    }

    pub fn groups(&self) -> Vec<KeywordGroup> {
        KeywordGroup::ALL
            .into_iter()
            .filter(|g| match g {
                KeywordGroup::Rain => self.rain,
                KeywordGroup::Flood => self.flood,
            })
            .collect()
    }

    /// Matched group labels joined with `+`, e.g. `rain+flood`.
    pub fn labels(&self) -> String {
        self.groups()
            .into_iter()
            .map(KeywordGroup::label)
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// True when the event name mentions rain/storm or flooding.
pub fn is_relevant_event(event: Option<&str>) -> bool {
    EventMatch::of(event).is_relevant()
}
