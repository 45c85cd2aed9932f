//! Collaborator interfaces for the work steps actually perform.
//!
//! The sequencing core never shells out or touches files directly; it goes
//! through these narrow contracts. Each has a shell- or filesystem-backed
//! implementation here, and each can be swapped for a test double.

pub mod installer;
pub mod migration;
pub mod probe;
pub mod templates;

pub use installer::{Installer, ShellInstaller};
pub use migration::{Migrator, ShellMigrator};
pub use probe::{Probe, ShellProbe};
pub use templates::{FsTemplateWriter, TemplateWriter};

use crate::shell::CommandResult;

/// Raw result of a collaborator doing its work, before the step runner
/// classifies it into an [`Outcome`](crate::steps::Outcome).
#[derive(Debug, Clone)]
pub struct ActionOutput {
    /// Whether the work succeeded.
    pub success: bool,

    /// Failure detail for the run report (exit code, stderr tail).
    pub detail: Option<String>,
}

impl ActionOutput {
    /// A successful result.
    pub fn ok() -> Self {
        Self {
            success: true,
            detail: None,
        }
    }

    /// A failed result with a reason.
    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: Some(detail.into()),
        }
    }

    /// Classify a finished shell command.
    pub fn from_command(result: &CommandResult) -> Self {
        if result.success {
            return Self::ok();
        }

        let mut detail = match result.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };

        if let Some(line) = result.stderr.lines().rev().find(|l| !l.trim().is_empty()) {
            detail.push_str(": ");
            detail.push_str(line.trim());
        }

        Self::failed(detail)
    }
}
