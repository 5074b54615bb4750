//! Error types for ketname-core

use std::path::PathBuf;

use thiserror::Error;

/// Why a model reply could not be turned into a [`SuggestionSet`](crate::SuggestionSet).
#[derive(Error, Debug)]
pub enum ParseError {
    /// The (possibly fence-extracted) text is not JSON at all
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Valid JSON without a `suggestions` array
    #[error("'suggestions' property is missing or not an array.")]
    MissingSuggestions,

    /// An array entry lacks `name`, `reason` or a numeric `confidence`
    #[error("suggestion #{index} does not match {{name, reason, confidence}}: {source}")]
    InvalidSuggestion {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("suggestion #{index} has an empty name")]
    EmptyName { index: usize },
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown provider '{0}'")]
    UnknownProvider(String),
}

/// Failure to apply the final edit to the document.
#[derive(Error, Debug)]
pub enum EditError {
    #[error("failed to write {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The host refused the edit (document closed, read-only, ...)
    #[error("edit rejected: {0}")]
    Rejected(String),
}

/// Credential storage failures. The stored value never appears here.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("credential store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential store unavailable: {0}")]
    Unavailable(String),

    #[error("credential rejected: {0}")]
    Invalid(String),
}
