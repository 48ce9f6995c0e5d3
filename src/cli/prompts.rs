use std::io::BufRead;

use dialoguer::{theme::ColorfulTheme, Input};

use crate::cli::output;
use crate::errors::{LedgerError, LedgerResult};

/// Supplies answers to the console questions.
pub trait PromptSource {
    fn text(&mut self, prompt: &str) -> LedgerResult<String>;
}

/// Interactive prompts on the attached terminal.
pub struct TerminalPrompts {
    theme: ColorfulTheme,
}

impl TerminalPrompts {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompts {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptSource for TerminalPrompts {
    fn text(&mut self, prompt: &str) -> LedgerResult<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(LedgerError::from)
    }
}

/// Line based answers read from any buffered reader, one line per prompt.
pub struct ScriptedPrompts<R> {
    reader: R,
    echo: bool,
}

impl<R: BufRead> ScriptedPrompts<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, echo: true }
    }

    /// Controls whether prompt labels are written to stdout.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

impl<R: BufRead> PromptSource for ScriptedPrompts<R> {
    fn text(&mut self, prompt: &str) -> LedgerResult<String> {
        if self.echo {
            output::prompt(prompt);
        }
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(LedgerError::Prompt(format!(
                "input ended before answering `{prompt}`"
            )));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
