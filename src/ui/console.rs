use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::validate::Category;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input ended while waiting for an answer")]
    EndOfInput,

    #[error("no valid {category} after {attempts} attempts")]
    TooManyAttempts { category: Category, attempts: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Console – line-oriented prompt/answer over any reader and writer
// ---------------------------------------------------------------------------

/// Prompts go to `output`, answers come from `input`.  Generic so tests can
/// script a session with in-memory buffers.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Writer for report text.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` (no newline) and read one line.
    /// The trailing newline is stripped; end of input is an error.
    pub fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// [`Console::ask`], trimmed and lowercased.
    pub fn ask_normalized(&mut self, prompt: &str) -> Result<String, PromptError> {
        Ok(self.ask(prompt)?.trim().to_lowercase())
    }

    /// Ask a yes/no question.  Only "yes" (any case) counts as yes.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError> {
        Ok(self.ask_normalized(prompt)? == "yes")
    }
}
