//! OpenAI-compatible provider implementation

use super::convert::{from_openai_response, to_openai_request};
use super::types::{OpenAiConfig, OpenAiResponse};
use crate::error::{Error, Result, error_message_from_body};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateResponse};
use async_trait::async_trait;
use reqwest::Client;

/// OpenAI-compatible provider (bearer auth, `chat/completions`)
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiProvider {
    pub const ID: &'static str = "openai";

    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }
}

impl Default for OpenAiProvider {
    fn default() -> Self {
        Self::new(OpenAiConfig::default())
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn provider_id(&self) -> &str {
        Self::ID
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        if request.api_key.is_empty() {
            return Err(Error::MissingApiKey(Self::ID.to_string()));
        }

        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.config.model.clone());
        let url = format!("{}chat/completions", self.config.base_url);
        let body = to_openai_request(&request, &model);

        tracing::debug!(provider = Self::ID, model = %model, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&request.api_key)
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
        let openai_resp: OpenAiResponse = serde_json::from_str(&text)?;
        from_openai_response(openai_resp, &model)
    }
}
