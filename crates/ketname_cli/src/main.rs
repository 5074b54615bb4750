//! CLI entry point for ketname.

mod cli;
mod commands;
mod credentials;
mod editor;
mod output;
mod terminal;

use std::path::{Path, PathBuf};

use clap::Parser;
use ketname_observability::ObservabilityConfig;

use crate::cli::Cli;

const MAX_SEARCH_DEPTH: usize = 32;

/// Load env files without overriding variables that are already set.
/// Order: 1) `.env` (nearest ancestor of cwd)  2) `~/.ketname/env`
fn load_env_files() {
    if let Some(env_file) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_upwards(&cwd, ".env"))
    {
        let _ = dotenvy::from_path(&env_file);
    }
    if let Some(home) = dirs::home_dir() {
        let global = home.join(".ketname").join("env");
        if global.is_file() {
            let _ = dotenvy::from_path(&global);
        }
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .take(MAX_SEARCH_DEPTH)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn init_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env().with_target(verbose);
    if verbose {
        config = config.with_log_level("debug");
    }
    if let Err(e) = ketname_observability::init(config) {
        eprintln!("warning: logging disabled: {e}");
    }
}

#[tokio::main]
async fn main() {
    load_env_files();
    let cli = Cli::parse();
    init_logging(cli.verbose);
    output::init(cli.output);

    match commands::handle(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output::error(&format!("{e:#}"));
            std::process::exit(1);
        }
    }
}
