//! LLM client: one provider call, parsed into an [`LlmOutcome`].

use std::sync::Arc;
use std::time::Instant;

use ketname_llms::{GenerateRequest, Provider};
use ketname_observability::{llm_request_span, record_duration, record_error};
use tracing::Instrument;

use crate::contract::{FailureKind, LlmOutcome};
use crate::error::ParseError;
use crate::parse::parse_suggestions;

pub const PARSE_FAILURE_MESSAGE: &str =
    "Failed to parse the response from the AI. The format was invalid.";
pub const UNKNOWN_FAILURE_MESSAGE: &str = "An unknown error occurred while getting suggestions.";

/// Sends naming prompts through a [`Provider`].
#[derive(Clone)]
pub struct SuggestionClient {
    provider: Arc<dyn Provider>,
    model: Option<String>,
}

impl SuggestionClient {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            model: None,
        }
    }

    /// Use `model` instead of the provider's default.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn provider_id(&self) -> &str {
        self.provider.provider_id()
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Request suggestions for `prompt`.
    ///
    /// Makes exactly one provider call. Never fails: every error is folded
    /// into [`LlmOutcome::Failure`].
    pub async fn request_suggestions(&self, credential: &str, prompt: &str) -> LlmOutcome {
        let span = llm_request_span!(self.provider_id(), self.model());
        self.call(credential, prompt).instrument(span).await
    }

    async fn call(&self, credential: &str, prompt: &str) -> LlmOutcome {
        let mut request = GenerateRequest::new(credential, prompt);
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }

        let start = Instant::now();
        let result = self.provider.generate(request).await;
        record_duration("duration_ms", start.elapsed());

        match result {
            Ok(response) => match parse_suggestions(&response.text) {
                Ok(suggestions) => {
                    tracing::info!(
                        count = suggestions.len(),
                        model = %response.model,
                        "received naming suggestions"
                    );
                    LlmOutcome::Success(suggestions)
                }
                Err(err) => {
                    record_error(&err);
                    tracing::debug!(raw = %response.text, "unparseable model output");
                    LlmOutcome::failure(FailureKind::ParsingError, parse_failure_message(&err))
                }
            },
            Err(err) => {
                record_error(&err);
                classify_provider_error(&err)
            }
        }
    }
}

/// Request suggestions through `provider` with its default model.
pub async fn request_suggestions(
    provider: Arc<dyn Provider>,
    credential: &str,
    prompt: &str,
) -> LlmOutcome {
    SuggestionClient::new(provider)
        .request_suggestions(credential, prompt)
        .await
}

/// Map a provider error onto the failure taxonomy.
pub fn classify_provider_error(err: &ketname_llms::Error) -> LlmOutcome {
    if err.is_transport() {
        LlmOutcome::failure(
            FailureKind::ApiError,
            format!("An error occurred while communicating with the AI: {err}"),
        )
    } else {
        LlmOutcome::failure(FailureKind::UnknownError, UNKNOWN_FAILURE_MESSAGE)
    }
}

fn parse_failure_message(err: &ParseError) -> String {
    match err {
        ParseError::InvalidJson(_) => PARSE_FAILURE_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ketname_llms::Error;

    #[test]
    fn test_transport_errors_are_api_errors() {
        let outcome = classify_provider_error(&Error::api_error("gemini", 403, "denied"));
        match outcome {
            LlmOutcome::Failure(failure) => {
                assert_eq!(failure.kind, FailureKind::ApiError);
                assert!(failure.message.contains("gemini API error 403: denied"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_other_errors_are_unknown() {
        let outcome = classify_provider_error(&Error::Other("weird".into()));
        assert_eq!(
            outcome,
            LlmOutcome::failure(FailureKind::UnknownError, UNKNOWN_FAILURE_MESSAGE)
        );
    }

    #[test]
    fn test_missing_suggestions_message() {
        assert_eq!(
            parse_failure_message(&ParseError::MissingSuggestions),
            "'suggestions' property is missing or not an array."
        );
    }
}
