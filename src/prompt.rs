//! Interactive yes/no confirmation.

use crate::error::Result;
use std::io::{self, BufRead, Write};

/// Asks the operator to confirm an action.
pub trait Confirm {
    /// Ask `[<action>/confirm] Are you sure you want to <purpose>? [y/N]: `.
    ///
    /// Returns `Ok(true)` only for an explicit affirmative answer.
    fn confirm(&mut self, action: &str, purpose: &str) -> Result<bool>;
}

/// Prompt reading answers from a line-oriented input.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

/// Prompt on the process's stdin and stdout.
pub fn stdio_prompt() -> LinePrompt<io::StdinLock<'static>, io::Stdout> {
    LinePrompt::new(io::stdin().lock(), io::stdout())
}

/// Whether an answer counts as consent.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, action: &str, purpose: &str) -> Result<bool> {
        write!(
            self.output,
            "[{}/confirm] Are you sure you want to {}? [y/N]: ",
            action, purpose
        )?;
        self.output.flush()?;

        let mut answer = Vec::new();
        // EOF leaves `answer` empty, which declines. Invalid UTF-8 declines too.
        self.input.read_until(b'\n', &mut answer)?;

        Ok(is_affirmative(&String::from_utf8_lossy(&answer)))
    }
}
