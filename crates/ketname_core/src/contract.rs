//! Response contract: what a naming request can come back with.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// One suggested identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub reason: String,
    /// Model-reported quality, nominally 0.0..=1.0. Not clamped or range-checked.
    pub confidence: f64,
}

impl Suggestion {
    pub fn new(name: impl Into<String>, reason: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
            confidence,
        }
    }

    /// Confidence as a rounded percentage, e.g. `0.95` → `95`.
    pub fn confidence_percent(&self) -> i64 {
        (self.confidence * 100.0).round() as i64
    }
}

/// Suggestions ordered by confidence, highest first.
///
/// Only constructible through [`SuggestionSet::from_unsorted`] (or the
/// response parser, which calls it), so every value is sorted and every
/// name is non-empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SuggestionSet {
    suggestions: Vec<Suggestion>,
}

impl SuggestionSet {
    /// Validate names and sort by confidence descending.
    ///
    /// The sort is stable: suggestions with equal confidence keep the
    /// order the model gave them.
    pub fn from_unsorted(mut suggestions: Vec<Suggestion>) -> Result<Self, ParseError> {
        if let Some(index) = suggestions.iter().position(|s| s.name.trim().is_empty()) {
            return Err(ParseError::EmptyName { index });
        }
        suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(Self { suggestions })
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.suggestions.get(index)
    }

    /// Highest-confidence suggestion.
    pub fn best(&self) -> Option<&Suggestion> {
        self.suggestions.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Suggestion> {
        self.suggestions.iter()
    }
}

impl<'a> IntoIterator for &'a SuggestionSet {
    type Item = &'a Suggestion;
    type IntoIter = std::slice::Iter<'a, Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.suggestions.iter()
    }
}

/// Why a naming request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// Transport or remote failure (network, auth, error status)
    ApiError,
    /// Reply was not JSON, or JSON of the wrong shape
    ParsingError,
    UnknownError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ApiError => write!(f, "API_ERROR"),
            FailureKind::ParsingError => write!(f, "PARSING_ERROR"),
            FailureKind::UnknownError => write!(f, "UNKNOWN_ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmFailure {
    pub kind: FailureKind,
    /// Human-readable, safe to show to the user
    pub message: String,
}

impl fmt::Display for LlmFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Result of one naming request. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LlmOutcome {
    Success(SuggestionSet),
    Failure(LlmFailure),
}

impl LlmOutcome {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        LlmOutcome::Failure(LlmFailure {
            kind,
            message: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LlmOutcome::Success(_))
    }

    pub fn suggestions(&self) -> Option<&SuggestionSet> {
        match self {
            LlmOutcome::Success(set) => Some(set),
            LlmOutcome::Failure(_) => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            LlmOutcome::Success(_) => None,
            LlmOutcome::Failure(failure) => Some(failure.kind),
        }
    }
}
