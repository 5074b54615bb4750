//! ketname_llms — provider-agnostic text generation for naming suggestions.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  ProviderRegistry                    │
//! │  ┌──────────────────────────────────────────────┐   │
//! │  │  HashMap<String, Arc<dyn Provider>>           │   │
//! │  └──────────────────────────────────────────────┘   │
//! │                       │                              │
//! │              ┌────────┴────────┐                     │
//! │              ▼                 ▼                     │
//! │       ┌───────────┐     ┌────────────┐              │
//! │       │  Gemini   │     │  OpenAI    │              │
//! │       │  Provider │     │  (compat)  │              │
//! │       └───────────┘     └────────────┘              │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! A provider turns one prompt into one block of raw text. It does not
//! interpret the text; parsing lives in `ketname-core`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ketname_llms::{GenerateRequest, GeminiProvider, Provider, ProviderRegistry};
//!
//! # async fn run() -> ketname_llms::Result<()> {
//! let registry = ProviderRegistry::new().register("gemini", GeminiProvider::default());
//! let provider = registry.get_provider("gemini")?;
//! let response = provider
//!     .generate(GenerateRequest::new("my-api-key", "Suggest a name"))
//!     .await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use provider::{Provider, ProviderRegistry};

pub use providers::{GeminiProvider, OpenAiProvider};

pub use types::{GenerateRequest, GenerateResponse};
