//! `ketname providers` subcommands.

use anyhow::Result;
use comfy_table::{Cell, Color};
use ketname_llms::ProviderRegistry;
use serde::Serialize;

use crate::cli::ProvidersAction;
use crate::commands::load_config;
use crate::output;

#[derive(Serialize)]
struct ProviderInfo {
    id: String,
    default_model: String,
    models: Vec<String>,
    selected: bool,
}

pub async fn handle(action: ProvidersAction) -> Result<()> {
    match action {
        ProvidersAction::List => list().await,
    }
}

async fn list() -> Result<()> {
    let config = load_config(None, None, None)?;
    let registry = ProviderRegistry::with_defaults();

    let mut ids = registry.list_providers();
    ids.sort();

    let mut infos = Vec::with_capacity(ids.len());
    for id in ids {
        let provider = registry.get_provider(&id)?;
        infos.push(ProviderInfo {
            default_model: provider.default_model().to_string(),
            models: provider.list_models().await?,
            selected: id == config.provider,
            id,
        });
    }

    if output::is_json() {
        output::data("providers", &infos);
        return Ok(());
    }

    output::header("Built-in Providers");
    let mut table = output::table(&["Provider", "Default model", "Models"]);
    for info in &infos {
        let id = if info.selected {
            Cell::new(format!("{} (selected)", info.id)).fg(Color::Green)
        } else {
            Cell::new(&info.id)
        };
        table.add_row(vec![
            id,
            Cell::new(&info.default_model),
            Cell::new(format_models(&info.models)),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn format_models(models: &[String]) -> String {
    if models.len() <= 3 {
        models.join(", ")
    } else {
        format!(
            "{}, {}, {} (+{} more)",
            models[0],
            models[1],
            models[2],
            models.len() - 3
        )
    }
}
