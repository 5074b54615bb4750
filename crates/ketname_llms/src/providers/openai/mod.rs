//! OpenAI-compatible provider module
//!
//! Works with any endpoint that speaks the Chat Completions API.

mod convert;
mod provider;
mod types;

pub use provider::OpenAiProvider;
pub use types::{OpenAiConfig, OpenAiRequest, OpenAiResponse};
