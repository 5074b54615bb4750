//! `ketname prompt`: show the request text without sending it.

use std::path::Path;

use anyhow::Result;
use ketname_core::{EditorSurface, FsKnowledgeSource, build_prompt, load_domain_knowledge};

use crate::cli::LineRange;
use crate::commands::load_config;
use crate::editor::FileEditor;
use crate::output;

pub async fn handle(file: &Path, lines: Option<LineRange>, intent: &str) -> Result<()> {
    let config = load_config(Some(file), None, None)?;
    let editor = FileEditor::open(file, lines)?;

    let context = editor
        .selection_text()
        .filter(|selection| !selection.is_empty())
        .unwrap_or_else(|| editor.document_text());

    let knowledge = load_domain_knowledge(
        &FsKnowledgeSource,
        &config.domain_knowledge,
        &config.workspace_root,
    )
    .await;
    for failure in &knowledge.failures {
        output::warning(&format!(
            "Skipped domain knowledge file {}: {}",
            failure.path.display(),
            failure.message
        ));
    }

    let prompt = build_prompt(&context, intent, &knowledge.text);
    if output::is_json() {
        output::data(
            "prompt",
            &serde_json::json!({
                "file": editor.path(),
                "prompt": prompt,
                "context_chars": context.chars().count(),
            }),
        );
    } else {
        println!("{prompt}");
    }
    Ok(())
}
