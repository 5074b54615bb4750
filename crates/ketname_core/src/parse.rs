//! Response parser: pull the JSON payload out of model text and validate it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::contract::{Suggestion, SuggestionSet};
use crate::error::ParseError;

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fence pattern is valid"));

/// Contents of the first ```` ```json ```` fenced block, trimmed.
///
/// Surrounding prose is discarded. Text without such a block is returned
/// unchanged.
pub fn extract_json_block(raw: &str) -> &str {
    JSON_FENCE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map_or(raw, |m| m.as_str())
}

/// Parse model output into a sorted, validated [`SuggestionSet`].
pub fn parse_suggestions(raw: &str) -> Result<SuggestionSet, ParseError> {
    let text = extract_json_block(raw);
    let value: Value = serde_json::from_str(text).map_err(ParseError::InvalidJson)?;

    let items = value
        .get("suggestions")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingSuggestions)?;

    let suggestions = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Suggestion::deserialize(item)
                .map_err(|source| ParseError::InvalidSuggestion { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    SuggestionSet::from_unsorted(suggestions)
}
