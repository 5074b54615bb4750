//! Unified request/response types shared by all providers

use std::fmt;

/// A single-prompt generation request.
///
/// The credential travels with the request rather than living in the
/// provider, so one provider instance can serve any key.
#[derive(Clone)]
pub struct GenerateRequest {
    /// API key for the remote service
    pub api_key: String,
    /// Model override; `None` uses the provider default
    pub model: Option<String>,
    /// Full prompt text sent as a single user turn
    pub prompt: String,
}

impl GenerateRequest {
    pub fn new(api_key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: None,
            prompt: prompt.into(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

// Never print the key.
impl fmt::Debug for GenerateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateRequest")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("prompt_len", &self.prompt.len())
            .finish()
    }
}

/// Raw text produced by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    pub text: String,
    /// Model that produced the text
    pub model: String,
    pub finish_reason: Option<String>,
}
