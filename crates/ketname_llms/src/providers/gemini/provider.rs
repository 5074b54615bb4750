//! Gemini provider implementation

use super::convert::{from_gemini_response, to_gemini_request};
use super::types::{GeminiConfig, GeminiResponse};
use crate::error::{Error, Result, error_message_from_body};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateResponse};
use async_trait::async_trait;
use reqwest::Client;

/// Gemini provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub const ID: &'static str = "gemini";

    /// Create a new Gemini provider
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}models/{}:generateContent", self.config.base_url, model)
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new(GeminiConfig::default())
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn provider_id(&self) -> &str {
        Self::ID
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec![
            "gemini-2.5-flash-lite".to_string(),
            "gemini-2.5-flash".to_string(),
            "gemini-2.5-pro".to_string(),
        ])
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        if request.api_key.is_empty() {
            return Err(Error::MissingApiKey(Self::ID.to_string()));
        }

        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.config.model.clone());
        let url = self.endpoint(&model);
        let body = to_gemini_request(&request);

        tracing::debug!(provider = Self::ID, model = %model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &request.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::api_error(
                Self::ID,
                status.as_u16(),
                error_message_from_body(&error_text),
            ));
        }

        let text = response.text().await?;
        let gemini_resp: GeminiResponse = serde_json::from_str(&text)?;
        from_gemini_response(gemini_resp, &model)
    }
}
