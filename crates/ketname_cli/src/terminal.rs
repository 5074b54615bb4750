//! Terminal implementation of the interactive prompts.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use comfy_table::{Cell, Color};
use console::style;
use indicatif::ProgressBar;
use ketname_core::{Interaction, PickItem};

use crate::output;

#[derive(Default)]
pub struct TerminalUi {
    intent: Option<String>,
    assume_yes: bool,
    spinner: Mutex<Option<ProgressBar>>,
    input_failed: AtomicBool,
}

impl TerminalUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the intent prompt with `intent` instead of asking.
    pub fn with_intent(mut self, intent: Option<String>) -> Self {
        self.intent = intent;
        self
    }

    /// Accept large contexts and take the top suggestion without asking.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// A prompt could not be read at all, as opposed to the user leaving it empty.
    pub fn input_failed(&self) -> bool {
        self.input_failed.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Interaction for TerminalUi {
    fn info(&self, message: &str) {
        output::info(message);
    }

    fn error(&self, message: &str) {
        output::error(message);
    }

    async fn confirm_large_context(&self, length: usize) -> bool {
        if self.assume_yes {
            return true;
        }
        output::warning(&format!(
            "The selected context is {length} characters long. The AI may respond slowly or less accurately."
        ));
        read_line("Continue? [y/N] ")
            .is_some_and(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    async fn prompt_intent(&self) -> Option<String> {
        if let Some(intent) = &self.intent {
            return Some(intent.clone());
        }
        println!(
            "{}",
            style("Describe the name you want, in any language (e.g. ユーザー情報を格納する変数)").dim()
        );
        read_line("Intent: ")
    }

    async fn prompt_credential(&self) -> Option<String> {
        match read_masked("Enter your API key:") {
            Ok(key) if !key.is_empty() => Some(key),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(error = %err, "masked input failed");
                output::error(&format!("Could not read the API key: {err}"));
                self.input_failed.store(true, Ordering::Relaxed);
                None
            }
        }
    }

    async fn pick_suggestion(&self, items: &[PickItem]) -> Option<usize> {
        if output::is_json() {
            output::data("suggestions", &items);
        } else {
            print_suggestions(items);
        }
        if self.assume_yes {
            return (!items.is_empty()).then_some(0);
        }

        let answer = read_line(&format!("Choose a name [1-{}] (empty to cancel): ", items.len()))?;
        match answer.trim().parse::<usize>() {
            Ok(n) if (1..=items.len()).contains(&n) => Some(n - 1),
            _ => {
                output::warning(&format!("'{}' is not a valid choice.", answer.trim()));
                None
            }
        }
    }

    fn progress_started(&self, title: &str) {
        let spinner = output::spinner(title);
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner);
        }
    }

    fn progress_finished(&self) {
        if let Some(spinner) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) {
            spinner.finish_and_clear();
        }
    }
}

fn print_suggestions(items: &[PickItem]) {
    let mut table = output::table(&["#", "Name", "Confidence", "Reason"]);
    for (i, item) in items.iter().enumerate() {
        let confidence = item
            .description
            .strip_prefix("Confidence: ")
            .unwrap_or(&item.description);
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&item.label).fg(Color::Green),
            Cell::new(confidence),
            Cell::new(&item.detail),
        ]);
    }
    println!("{table}");
}

/// Print `prompt` and read one line. `None` on EOF, read error or empty input.
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok()?;

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            let trimmed = input.trim_end_matches(['\r', '\n']);
            (!trimmed.trim().is_empty()).then(|| trimmed.to_string())
        }
    }
}

/// Read a secret with echo replaced by `*`. Ctrl-C returns an empty string.
/// Fails when stdin is not an interactive terminal.
pub fn read_masked(label: &str) -> io::Result<String> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
        terminal,
    };

    if !io::stdin().is_terminal() {
        return Err(io::Error::other(
            "stdin is not an interactive terminal (TTY); set KETNAME_API_KEY instead",
        ));
    }

    println!("{label}");
    print!("> ");
    io::stdout().flush()?;

    let mut key = String::new();
    terminal::enable_raw_mode()?;

    let result = loop {
        match event::poll(Duration::from_millis(100)) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => break Err(err),
        }
        let event = match event::read() {
            Ok(event) => event,
            Err(err) => break Err(err),
        };
        let Event::Key(k) = event else { continue };
        if k.kind == KeyEventKind::Release {
            continue;
        }
        match k.code {
            KeyCode::Enter => break Ok(()),
            KeyCode::Backspace => {
                if key.pop().is_some() {
                    print!("\x08 \x08");
                    let _ = io::stdout().flush();
                }
            }
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                key.clear();
                break Ok(());
            }
            KeyCode::Char(c) => {
                key.push(c);
                print!("*");
                let _ = io::stdout().flush();
            }
            _ => {}
        }
    };

    terminal::disable_raw_mode()?;
    println!();
    result.map(|()| key)
}
