//! `ketname config` subcommands.

use anyhow::Result;
use ketname_core::CredentialStore;

use crate::cli::ConfigAction;
use crate::commands::load_config;
use crate::credentials::{API_KEY_VAR, EnvFileCredentialStore, mask_key};
use crate::output;
use crate::terminal::read_masked;

pub async fn handle(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Api => configure_api().await,
        ConfigAction::Show => show().await,
    }
}

async fn configure_api() -> Result<()> {
    let store = EnvFileCredentialStore::from_env()?;

    output::header("Configure API key");
    if let Some(current) = store.get().await? {
        output::kv("current", &mask_key(&current));
    }

    let key = read_masked("Enter the API key for your provider:")?;
    if key.is_empty() {
        output::warning("No key entered, cancelled.");
        return Ok(());
    }

    store.set(&key).await?;
    output::success(&format!(
        "Saved {API_KEY_VAR} to {}",
        store.path().display()
    ));
    output::dim("It is read automatically on the next run.");
    Ok(())
}

async fn show() -> Result<()> {
    let config = load_config(None, None, None)?;
    let store = EnvFileCredentialStore::from_env()?;
    let api_key = match store.get().await? {
        Some(key) => mask_key(&key),
        None => "not set".to_string(),
    };

    if output::is_json() {
        output::data(
            "config",
            &serde_json::json!({
                "config": &config,
                "effective_model": config.effective_model()?,
                "api_key": api_key,
            }),
        );
        return Ok(());
    }

    output::header("Effective configuration");
    output::kv("provider", &config.provider);
    output::kv("model", config.effective_model()?);
    output::kv(
        "base_url",
        config.base_url.as_deref().unwrap_or("(provider default)"),
    );
    output::kv("workspace", &config.workspace_root.display().to_string());
    output::kv(
        "config file",
        &config
            .config_path
            .as_ref()
            .map_or_else(|| "(none)".to_string(), |p| p.display().to_string()),
    );
    if config.domain_knowledge.is_empty() {
        output::kv("domain knowledge", "(none)");
    } else {
        for path in &config.domain_knowledge {
            output::kv("domain knowledge", &path.display().to_string());
        }
    }
    output::kv("api key", &api_key);
    Ok(())
}
