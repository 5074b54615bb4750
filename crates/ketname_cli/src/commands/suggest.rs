//! `ketname suggest`

use std::path::PathBuf;

use anyhow::Result;
use ketname_core::{CommandOutcome, FsKnowledgeSource, SuggestNameCommand, SuggestionClient};

use crate::cli::LineRange;
use crate::commands::load_config;
use crate::credentials::EnvFileCredentialStore;
use crate::editor::FileEditor;
use crate::output;
use crate::terminal::TerminalUi;

pub struct SuggestArgs {
    pub file: PathBuf,
    pub lines: Option<LineRange>,
    pub intent: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub yes: bool,
}

/// Run the naming command on one file. `Ok(true)` when a name was written
/// or the user cancelled. A prompt that could not be read is a failure.
pub async fn handle(args: SuggestArgs) -> Result<bool> {
    let config = load_config(Some(&args.file), args.provider, args.model)?;
    let client = SuggestionClient::new(config.build_provider()?);
    tracing::debug!(
        provider = client.provider_id(),
        model = client.model(),
        file = %args.file.display(),
        "running suggest"
    );

    let editor = FileEditor::open(&args.file, args.lines)?;
    let ui = TerminalUi::new()
        .with_intent(args.intent)
        .assume_yes(args.yes);
    let credentials = EnvFileCredentialStore::from_env()?;

    let outcome = SuggestNameCommand::new(&ui, &credentials, &FsKnowledgeSource, &client, &config)
        .with_editor(&editor)
        .run()
        .await;

    let input_failed = ui.input_failed();
    report(&outcome, input_failed);
    Ok(!outcome.is_error() && !input_failed)
}

fn report(outcome: &CommandOutcome, input_failed: bool) {
    if output::is_json() {
        output::data("outcome", outcome);
    } else if let Some(notice) = closing_notice(outcome, input_failed) {
        output::dim(notice);
    }
}

fn closing_notice(outcome: &CommandOutcome, input_failed: bool) -> Option<&'static str> {
    match outcome {
        // Declining the size warning ends the run silently.
        CommandOutcome::ContextTooLarge { .. } => None,
        _ if outcome.is_cancelled() && !input_failed => Some("Cancelled."),
        _ => None,
    }
}
