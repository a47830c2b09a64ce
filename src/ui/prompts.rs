//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! Prompts take their input and output streams as parameters so that
//! commands can be driven from tests without a terminal.

use std::io::{BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Prompt for a single line of text input.
///
/// Writes `message` to `output`, reads one line from `input`, and
/// returns it with surrounding whitespace trimmed. End of input yields
/// an empty string; callers decide whether that is acceptable.
pub fn input_line<R, W>(message: &str, input: &mut R, output: &mut W) -> Result<String, PromptError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
