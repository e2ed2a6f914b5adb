//! Extract the index array from a ranking assistant's free-form reply.
//!
//! This is the only place that looks at raw assistant text. Everything past it
//! sees either a clean `Vec<usize>` or `None`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Opening/closing code fences, with an optional language tag (```` ```json ````).
static RE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[A-Za-z]*").expect("fence regex"));
/// First bracketed, comma-separated list of non-negative ASCII decimal integers.
static RE_INT_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*[0-9]+(?:\s*,\s*[0-9]+)*\s*\]").expect("int array regex"));

/// Strip fences and stray backticks, then trim.
pub fn strip_code_fences(raw: &str) -> String {
    RE_FENCE.replace_all(raw, "").replace('`', "").trim().to_string()
}

/// Parse the ranking reply into indices, in the order given (most relevant first).
///
/// Returns `None` when there is no integer array in the text, or when the
/// matched array is not valid JSON made only of numbers.
pub fn parse_indices(raw: &str) -> Option<Vec<usize>> {
    let cleaned = strip_code_fences(raw);
    let m = RE_INT_ARRAY.find(&cleaned)?;

    let parsed: Value = serde_json::from_str(m.as_str()).ok()?;
    parsed
        .as_array()?
        .iter()
        .map(|v| v.as_u64().and_then(|n| usize::try_from(n).ok()))
        .collect()
}
