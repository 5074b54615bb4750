//! Error types for provider calls

use thiserror::Error;

/// Errors returned by providers and the registry.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API answered with a non-success status
    #[error("{provider} API error {status}: {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    /// No credential was supplied for a provider that needs one
    #[error("Missing API key for provider: {0}")]
    MissingApiKey(String),

    /// The remote API answered successfully but carried no text
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Request or response body could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No provider registered under the requested ID
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn api_error(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn empty_response(message: impl Into<String>) -> Self {
        Self::EmptyResponse(message.into())
    }

    /// True when the failure happened while talking to the remote service
    /// (network, authentication, remote error status, unusable reply).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::Api { .. }
                | Error::MissingApiKey(_)
                | Error::EmptyResponse(_)
                | Error::Serialization(_)
        )
    }
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Pull a readable message out of a provider error body.
///
/// Both Gemini and OpenAI wrap failures as `{"error": {"message": "..."}}`;
/// anything else is returned trimmed as-is.
pub(crate) fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json_body() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message_from_body(body), "API key not valid");
    }

    #[test]
    fn test_error_message_from_plain_body() {
        assert_eq!(error_message_from_body("  upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn test_transport_classification() {
        assert!(Error::api_error("gemini", 401, "unauthorized").is_transport());
        assert!(Error::MissingApiKey("gemini".into()).is_transport());
        assert!(Error::empty_response("no candidates").is_transport());
        assert!(!Error::Other("boom".into()).is_transport());
        assert!(!Error::ProviderNotFound("x".into()).is_transport());
    }
}
