//! Terminal output helpers, dual-mode: styled text for humans, JSON lines for machines.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for structured data
//! - `indicatif` for spinners

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    JSON_MODE.store(matches!(format, OutputFormat::Json), Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn to_json_line(level: &str, message: &str, data: Option<&JsonValue>) -> String {
    let msg = Msg {
        level,
        message,
        data,
    };
    serde_json::to_string(&msg).unwrap_or_else(|_| {
        serde_json::json!({ "level": level, "message": message }).to_string()
    })
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    println!("{}", to_json_line(level, message, data));
}

// ── Public helpers ─────────────────────────────────────────────────

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

pub fn success(text: &str) {
    if is_json() {
        emit_json("success", text, None);
    } else {
        println!("{} {}", style("✓").green(), style(text).bright());
    }
}

pub fn info(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{} {}", style("i").blue(), text);
    }
}

pub fn error(text: &str) {
    if is_json() {
        eprintln!("{}", to_json_line("error", text, None));
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        println!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).dim());
    }
}

/// Emit an arbitrary serializable value as structured output.
pub fn data<T: Serialize>(label: &str, value: &T) {
    if is_json() {
        let json_val = serde_json::to_value(value).unwrap_or(JsonValue::Null);
        emit_json("data", label, Some(&json_val));
    } else {
        let formatted =
            serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{label}: <?>"));
        println!("{formatted}");
    }
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    if is_json() {
        let data = serde_json::json!({ key: value });
        emit_json("info", key, Some(&data));
    } else {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

// ── Tables ─────────────────────────────────────────────────────────

/// Create a styled table with a bold cyan header row.
pub fn table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            columns
                .iter()
                .map(|name| Cell::new(name).fg(Color::Cyan).add_attribute(Attribute::Bold)),
        );
    table
}

// ── Spinners ───────────────────────────────────────────────────────

/// Spinner on stderr; hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
