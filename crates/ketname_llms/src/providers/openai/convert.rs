//! Conversion between unified types and Chat Completions types

use super::types::{OpenAiMessage, OpenAiRequest, OpenAiResponse};
use crate::error::{Error, Result};
use crate::types::{GenerateRequest, GenerateResponse};

/// Convert unified request to a single user message request
pub fn to_openai_request(req: &GenerateRequest, model: &str) -> OpenAiRequest {
    OpenAiRequest {
        model: model.to_string(),
        messages: vec![OpenAiMessage {
            role: "user".to_string(),
            content: Some(req.prompt.clone()),
        }],
    }
}

/// Convert Chat Completions response to unified response
pub fn from_openai_response(resp: OpenAiResponse, model: &str) -> Result<GenerateResponse> {
    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::empty_response("no choices in chat completion response"))?;

    let text = choice
        .message
        .content
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::empty_response("no content in chat completion choice"))?;

    Ok(GenerateResponse {
        text,
        model: resp.model.unwrap_or_else(|| model.to_string()),
        finish_reason: choice.finish_reason,
    })
}
