//! src/prompt.rs

use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, BufRead, IsTerminal, Write};

/// Source of one-line answers from the user.
pub trait Prompter {
    /// Shows `label` and returns the trimmed answer.
    ///
    /// `None` means input is closed and nothing more will arrive. A read
    /// error counts as an empty answer.
    fn ask(&mut self, label: &str) -> Option<String>;
}

/// Reads from the process's stdin: a dialoguer prompt when attached to a
/// terminal, plain lines otherwise (pipes, scripts, tests).
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, label: &str) -> Option<String> {
        if io::stdin().is_terminal() {
            let answer = Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(label)
                .allow_empty(true)
                .interact_text()
                .unwrap_or_default();
            return Some(answer.trim().to_string());
        }

        print!("{label}: ");
        let _ = io::stdout().flush();
        read_answer(&mut io::stdin().lock())
    }
}

fn read_answer(reader: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(e) => {
            log::debug!("discarding unreadable input: {e}");
            Some(String::new())
        }
    }
}
