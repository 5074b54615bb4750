//! Orchestrator: runs one naming request from context to edit.
//!
//! ```text
//! editor ─▶ context ─▶ size check ─▶ intent ─▶ credential
//!                                                  │
//!   edit ◀─ picker ◀─ LLM ◀─ prompt ◀─ placeholder ◀─ domain knowledge
//! ```
//!
//! Every step that can stop the flow maps to one [`CommandOutcome`]. Host
//! specifics sit behind the traits in [`surfaces`].

mod command;
pub mod surfaces;

pub use command::{
    CREDENTIAL_MISSING_MESSAGE, CommandOutcome, INTENT_MISSING_MESSAGE, MAX_CONTEXT_LENGTH,
    NO_CONTEXT_MESSAGE, NO_EDITOR_MESSAGE, NO_PLACEHOLDER_MESSAGE, NO_SUGGESTIONS_MESSAGE,
    PROGRESS_TITLE, SuggestNameCommand,
};
pub use surfaces::{CredentialStore, EditorSurface, Interaction, PickItem};
