//! The "suggest name" command flow.

use serde::Serialize;

use super::surfaces::{CredentialStore, EditorSurface, Interaction, PickItem};
use crate::client::SuggestionClient;
use crate::config::KetnameConfig;
use crate::contract::{LlmFailure, LlmOutcome};
use crate::knowledge::{KnowledgeSource, load_domain_knowledge};
use crate::placeholder::{detect_placeholder, replace_placeholder};
use crate::prompt::build_prompt;

/// Contexts longer than this many characters need confirmation.
pub const MAX_CONTEXT_LENGTH: usize = 3000;

pub const NO_EDITOR_MESSAGE: &str = "No active text editor found.";
pub const NO_CONTEXT_MESSAGE: &str = "No code found to use as naming context.";
pub const INTENT_MISSING_MESSAGE: &str = "No naming intent was entered.";
pub const CREDENTIAL_MISSING_MESSAGE: &str =
    "API key is not set. Enter it once and it will be stored for later runs.";
pub const NO_PLACEHOLDER_MESSAGE: &str = "No placeholder (KV or KM) found in the file.";
pub const NO_SUGGESTIONS_MESSAGE: &str = "No naming suggestions found.";
pub const PROGRESS_TITLE: &str = "Generating naming suggestions...";

/// How a run of the command ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    NoEditor,
    NoContext,
    /// The user declined to send an oversized context.
    ContextTooLarge { length: usize },
    IntentMissing,
    CredentialMissing,
    NoPlaceholder,
    LlmFailed(LlmFailure),
    NoSuggestions,
    SelectionCancelled,
    EditFailed { message: String },
    Replaced { placeholder: String, name: String },
}

impl CommandOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced { .. })
    }

    /// The user backed out at one of the prompts.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::ContextTooLarge { .. }
                | Self::IntentMissing
                | Self::CredentialMissing
                | Self::SelectionCancelled
        )
    }

    /// Neither replaced nor cancelled.
    pub fn is_error(&self) -> bool {
        !self.is_replaced() && !self.is_cancelled()
    }
}

/// One invocation of the naming command with its collaborators.
pub struct SuggestNameCommand<'a> {
    editor: Option<&'a dyn EditorSurface>,
    ui: &'a dyn Interaction,
    credentials: &'a dyn CredentialStore,
    knowledge: &'a dyn KnowledgeSource,
    client: &'a SuggestionClient,
    config: &'a KetnameConfig,
}

impl<'a> SuggestNameCommand<'a> {
    pub fn new(
        ui: &'a dyn Interaction,
        credentials: &'a dyn CredentialStore,
        knowledge: &'a dyn KnowledgeSource,
        client: &'a SuggestionClient,
        config: &'a KetnameConfig,
    ) -> Self {
        Self {
            editor: None,
            ui,
            credentials,
            knowledge,
            client,
            config,
        }
    }

    /// Attach the active document. Without one the command ends with
    /// [`CommandOutcome::NoEditor`].
    pub fn with_editor(mut self, editor: &'a dyn EditorSurface) -> Self {
        self.editor = Some(editor);
        self
    }

    pub async fn run(&self) -> CommandOutcome {
        let Some(editor) = self.editor else {
            self.ui.info(NO_EDITOR_MESSAGE);
            return CommandOutcome::NoEditor;
        };

        let document = editor.document_text();
        let context = match editor.selection_text() {
            Some(selection) if !selection.is_empty() => selection,
            _ => document.clone(),
        };
        if context.is_empty() {
            self.ui.info(NO_CONTEXT_MESSAGE);
            return CommandOutcome::NoContext;
        }

        let length = context.chars().count();
        if length > MAX_CONTEXT_LENGTH && !self.ui.confirm_large_context(length).await {
            tracing::debug!(length, "large context declined");
            return CommandOutcome::ContextTooLarge { length };
        }

        let intent = match self.ui.prompt_intent().await {
            Some(intent) if !intent.trim().is_empty() => intent,
            _ => {
                self.ui.info(INTENT_MISSING_MESSAGE);
                return CommandOutcome::IntentMissing;
            }
        };

        let Some(credential) = self.credential().await else {
            return CommandOutcome::CredentialMissing;
        };

        let knowledge = load_domain_knowledge(
            self.knowledge,
            &self.config.domain_knowledge,
            &self.config.workspace_root,
        )
        .await;
        for failure in &knowledge.failures {
            self.ui.error(&format!(
                "Failed to read domain knowledge file {}: {}",
                failure.path.display(),
                failure.message
            ));
        }

        let Some(placeholder) = detect_placeholder(&document) else {
            self.ui.info(NO_PLACEHOLDER_MESSAGE);
            return CommandOutcome::NoPlaceholder;
        };

        let prompt = build_prompt(&context, &intent, &knowledge.text);
        self.ui.progress_started(PROGRESS_TITLE);
        let outcome = self.client.request_suggestions(&credential, &prompt).await;
        self.ui.progress_finished();

        let suggestions = match outcome {
            LlmOutcome::Success(suggestions) => suggestions,
            LlmOutcome::Failure(failure) => {
                self.ui.error(&format!(
                    "Error while getting naming suggestions from the AI: {}",
                    failure.message
                ));
                return CommandOutcome::LlmFailed(failure);
            }
        };
        if suggestions.is_empty() {
            self.ui.info(NO_SUGGESTIONS_MESSAGE);
            return CommandOutcome::NoSuggestions;
        }

        let items: Vec<PickItem> = suggestions.iter().map(PickItem::from).collect();
        let Some(name) = self
            .ui
            .pick_suggestion(&items)
            .await
            .and_then(|index| suggestions.get(index))
            .map(|suggestion| suggestion.name.clone())
        else {
            return CommandOutcome::SelectionCancelled;
        };

        let updated = replace_placeholder(&document, placeholder, &name);
        if let Err(err) = editor.replace_document(&updated).await {
            tracing::warn!(error = %err, "edit failed");
            self.ui.error(&format!("Failed to apply the edit: {err}"));
            return CommandOutcome::EditFailed {
                message: err.to_string(),
            };
        }

        self.ui.info(&format!("Replaced '{placeholder}' with '{name}'."));
        CommandOutcome::Replaced {
            placeholder: placeholder.to_string(),
            name,
        }
    }

    /// Stored credential, or one entered now (and stored).
    async fn credential(&self) -> Option<String> {
        match self.credentials.get().await {
            Ok(Some(credential)) if !credential.is_empty() => return Some(credential),
            Ok(_) => {}
            Err(err) => tracing::warn!(error = %err, "credential store read failed"),
        }

        self.ui.error(CREDENTIAL_MISSING_MESSAGE);
        let entered = self
            .ui
            .prompt_credential()
            .await
            .filter(|credential| !credential.is_empty())?;

        if let Err(err) = self.credentials.set(&entered).await {
            self.ui.error(&format!("Failed to store the API key: {err}"));
        }
        Some(entered)
    }
}
