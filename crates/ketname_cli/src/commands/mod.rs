//! Command dispatch.

pub mod config;
pub mod prompt;
pub mod providers;
pub mod suggest;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ketname_core::KetnameConfig;

use crate::cli::{Cli, Command};

/// `Ok(false)`: the command ran but did not succeed; exit non-zero without
/// printing another error.
pub async fn handle(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::Suggest {
            file,
            lines,
            intent,
            provider,
            model,
            yes,
        } => {
            suggest::handle(suggest::SuggestArgs {
                file,
                lines,
                intent,
                provider,
                model,
                yes,
            })
            .await
        }
        Command::Prompt {
            file,
            lines,
            intent,
        } => prompt::handle(&file, lines, &intent).await.map(|()| true),
        Command::Config { action } => config::handle(action).await.map(|()| true),
        Command::Providers { action } => providers::handle(action).await.map(|()| true),
    }
}

/// Configuration for work on `file`: searched from the file's directory,
/// rooted at the current directory when no config file exists, with flag
/// overrides on top.
pub(crate) fn load_config(
    file: Option<&Path>,
    provider: Option<String>,
    model: Option<String>,
) -> Result<KetnameConfig> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let start = match file.and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => absolute(&cwd, dir),
        _ => cwd.clone(),
    };

    let mut config = KetnameConfig::load(&start, &cwd)?;
    if let Some(provider) = provider {
        config = config.with_provider(provider);
    }
    if let Some(model) = model {
        config = config.with_model(model);
    }
    Ok(config)
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
