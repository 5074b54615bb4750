//! ketname-core: naming suggestions from an LLM.
//!
//! - [`prompt`] builds the request text.
//! - [`client`] sends it through a [`ketname_llms::Provider`] and folds every
//!   result into an [`LlmOutcome`].
//! - [`parse`] recovers the JSON payload and validates it.
//! - [`orchestrator`] runs the interactive flow against host traits.

pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod knowledge;
pub mod orchestrator;
pub mod parse;
pub mod placeholder;
pub mod prompt;

#[cfg(test)]
mod tests;

pub use client::{SuggestionClient, request_suggestions};
pub use config::KetnameConfig;
pub use contract::{FailureKind, LlmFailure, LlmOutcome, Suggestion, SuggestionSet};
pub use error::{ConfigError, CredentialError, EditError, ParseError};
pub use knowledge::{DomainKnowledge, FsKnowledgeSource, KnowledgeSource, load_domain_knowledge};
pub use orchestrator::{
    CommandOutcome, CredentialStore, EditorSurface, Interaction, PickItem, SuggestNameCommand,
};
pub use parse::{extract_json_block, parse_suggestions};
pub use placeholder::{PLACEHOLDERS, detect_placeholder, replace_placeholder};
pub use prompt::build_prompt;
