//! CLI argument definitions using clap derive macros.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Identifier names from an LLM, substituted for KV/KM placeholders
#[derive(Parser)]
#[command(name = "ketname", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts and editor integrations
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Suggest a name for the placeholder in FILE and write the chosen one back
    Suggest {
        /// File containing a KV or KM placeholder
        file: PathBuf,
        /// Use lines START:END (1-based, inclusive) as the naming context
        #[arg(long, value_parser = parse_line_range)]
        lines: Option<LineRange>,
        /// Naming intent; prompted for when omitted
        #[arg(short, long)]
        intent: Option<String>,
        /// Provider to use (gemini, openai). Uses KETNAME_PROVIDER if not set.
        #[arg(long)]
        provider: Option<String>,
        /// Model to use. Uses KETNAME_MODEL if not set.
        #[arg(long)]
        model: Option<String>,
        /// Skip confirmations and take the top suggestion
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the prompt that would be sent, without calling the provider
    Prompt {
        file: PathBuf,
        #[arg(long, value_parser = parse_line_range)]
        lines: Option<LineRange>,
        #[arg(short, long)]
        intent: String,
    },
    /// Configure ketname settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Inspect LLM providers
    Providers {
        #[command(subcommand)]
        action: ProvidersAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Store the provider API key in ~/.ketname/env
    Api,
    /// Show the effective configuration
    Show,
}

#[derive(Subcommand)]
pub enum ProvidersAction {
    /// List built-in providers and their models
    List,
}

/// 1-based inclusive line range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Parse `START:END` or a single line number `N`.
pub fn parse_line_range(value: &str) -> Result<LineRange, String> {
    let (start, end) = match value.split_once(':') {
        Some((start, end)) => (start, end),
        None => (value, value),
    };
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| format!("'{s}' is not a line number"))
    };
    let (start, end) = (parse(start)?, parse(end)?);

    if start == 0 {
        return Err("line numbers start at 1".to_string());
    }
    if end < start {
        return Err(format!("end line {end} is before start line {start}"));
    }
    Ok(LineRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_range() {
        assert_eq!(parse_line_range("3:7"), Ok(LineRange { start: 3, end: 7 }));
        assert_eq!(parse_line_range("4"), Ok(LineRange { start: 4, end: 4 }));
    }

    #[test]
    fn test_parse_line_range_rejects_bad_input() {
        assert!(parse_line_range("0:2").is_err());
        assert!(parse_line_range("5:2").is_err());
        assert!(parse_line_range("a:b").is_err());
        assert!(parse_line_range("").is_err());
    }

    #[test]
    fn test_cli_parses_suggest() {
        let cli = Cli::try_parse_from([
            "ketname", "suggest", "src/main.rs", "--lines", "2:4", "--intent", "counter", "--yes",
            "-o", "json",
        ])
        .unwrap();
        assert!(matches!(cli.output, OutputFormat::Json));
        match cli.command {
            Command::Suggest {
                file, lines, intent, yes, ..
            } => {
                assert_eq!(file, PathBuf::from("src/main.rs"));
                assert_eq!(lines, Some(LineRange { start: 2, end: 4 }));
                assert_eq!(intent.as_deref(), Some("counter"));
                assert!(yes);
            }
            _ => panic!("expected suggest"),
        }
    }

    #[test]
    fn test_prompt_requires_intent() {
        assert!(Cli::try_parse_from(["ketname", "prompt", "a.rs"]).is_err());
    }
}
