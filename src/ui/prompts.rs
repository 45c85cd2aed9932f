//! Interactive prompts.

use console::Term;
use dialoguer::Confirm;

use crate::error::{GroundworkError, Result};

/// Convert dialoguer errors to GroundworkError.
fn map_dialoguer_err(e: dialoguer::Error) -> GroundworkError {
    GroundworkError::Io(e.into())
}

/// Check whether stdout is attached to a terminal.
pub fn stdout_is_terminal() -> bool {
    Term::stdout().is_term()
}

/// Ask a yes/no question.
pub fn confirm(question: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact()
        .map_err(map_dialoguer_err)
}
