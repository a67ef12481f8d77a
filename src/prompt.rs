//! User input and interaction handling.

use dialoguer::theme::Theme;
use dialoguer::Input;
use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::{Error, Result};

/// Source of answers for interactive questions.
pub trait Prompter {
    /// Shows `prompt` and returns the line typed by the user.
    fn input(&self, prompt: &str) -> Result<String>;
}

/// Shows prompts as they are, followed by a single space.
#[derive(Debug, Default)]
pub struct PlainTheme;

impl Theme for PlainTheme {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{prompt} ")
    }
}

/// Writes `prompt` to `writer` and reads one line from `reader`, without its
/// line terminator.
pub fn read_input<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, prompt: &str) -> Result<String> {
    write!(writer, "{prompt} ")?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Reads answers from the terminal with dialoguer, or line by line from
/// standard input when it is not a terminal.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return read_input(&mut stdin.lock(), &mut io::stdout(), prompt);
        }
        Input::<String>::with_theme(&PlainTheme)
            .with_prompt(prompt)
            .allow_empty(true)
            .report(false)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Only `y`, `Y` and `yes` count as agreement.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer, "y" | "Y" | "yes")
}

/// Gently ask user's opinion.
pub fn ask_confirmation(prompter: &dyn Prompter, message: &str) -> Result<bool> {
    let answer = prompter.input(&format!("{message} (y/N)"))?;
    Ok(is_affirmative(&answer))
}

/// Fails with `Error::Aborted` immediately if the user disagrees.
pub fn ask_or_abort(prompter: &dyn Prompter, message: &str) -> Result<()> {
    if !ask_confirmation(prompter, message)? {
        return Err(Error::aborted("Aborted"));
    }
    Ok(())
}
