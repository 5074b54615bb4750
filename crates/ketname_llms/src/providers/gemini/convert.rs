//! Conversion between unified types and Gemini types

use super::types::{GeminiContent, GeminiPart, GeminiRequest, GeminiResponse};
use crate::error::{Error, Result};
use crate::types::{GenerateRequest, GenerateResponse};

/// Convert unified request to a single-turn Gemini request
pub fn to_gemini_request(req: &GenerateRequest) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: Some(req.prompt.clone()),
            }],
        }],
    }
}

/// Convert Gemini response to unified response.
///
/// Text parts of the first candidate are concatenated in order.
pub fn from_gemini_response(resp: GeminiResponse, model: &str) -> Result<GenerateResponse> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        let reason = resp
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("prompt blocked: {}", r))
            .unwrap_or_else(|| "no candidates in Gemini response".to_string());
        return Err(Error::empty_response(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(Error::empty_response(format!(
            "no text in Gemini candidate (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(GenerateResponse {
        text,
        model: resp.model_version.unwrap_or_else(|| model.to_string()),
        finish_reason: candidate.finish_reason,
    })
}
