//! Host collaborators the naming command talks to.

use async_trait::async_trait;
use serde::Serialize;

use crate::contract::Suggestion;
use crate::error::{CredentialError, EditError};

/// The open document.
#[async_trait]
pub trait EditorSurface: Send + Sync {
    /// Full text of the document.
    fn document_text(&self) -> String;

    /// Selected text, `None` when nothing is selected.
    fn selection_text(&self) -> Option<String>;

    /// Replace the whole document in one edit.
    async fn replace_document(&self, new_text: &str) -> Result<(), EditError>;
}

/// User-facing notices and prompts.
///
/// `None` / `false` returns mean the user dismissed the prompt.
#[async_trait]
pub trait Interaction: Send + Sync {
    fn info(&self, message: &str);

    fn error(&self, message: &str);

    /// Ask whether to continue with a context of `length` characters.
    async fn confirm_large_context(&self, length: usize) -> bool;

    async fn prompt_intent(&self) -> Option<String>;

    async fn prompt_credential(&self) -> Option<String>;

    /// Index into `items` of the chosen suggestion.
    async fn pick_suggestion(&self, items: &[PickItem]) -> Option<usize>;

    /// A non-cancellable operation started.
    fn progress_started(&self, title: &str);

    fn progress_finished(&self);
}

/// Secret storage for the provider API key.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self) -> Result<Option<String>, CredentialError>;

    async fn set(&self, credential: &str) -> Result<(), CredentialError>;
}

/// One row in the suggestion picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickItem {
    pub label: String,
    pub detail: String,
    pub description: String,
}

impl From<&Suggestion> for PickItem {
    fn from(suggestion: &Suggestion) -> Self {
        Self {
            label: suggestion.name.clone(),
            detail: suggestion.reason.clone(),
            description: format!("Confidence: {}%", suggestion.confidence_percent()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_item_from_suggestion() {
        let item = PickItem::from(&Suggestion::new("userData", "holds user info", 0.904));
        assert_eq!(item.label, "userData");
        assert_eq!(item.detail, "holds user info");
        assert_eq!(item.description, "Confidence: 90%");
    }

    #[test]
    fn test_out_of_range_confidence_is_shown_as_is() {
        let item = PickItem::from(&Suggestion::new("x", "", 1.5));
        assert_eq!(item.description, "Confidence: 150%");
    }
}
