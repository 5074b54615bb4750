use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateResponse};

/// A remote text-generation backend.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier, e.g. `"gemini"`.
    fn provider_id(&self) -> &str;

    /// Model used when the request does not name one.
    fn default_model(&self) -> &str;

    /// Models this provider is known to serve.
    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec![self.default_model().to_string()])
    }

    /// Send one prompt and return the model's raw text.
    ///
    /// Exactly one HTTP request is made; there are no retries.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}
