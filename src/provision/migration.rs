//! Database migration collaborator.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Result;
use crate::provision::ActionOutput;
use crate::shell::{execute, CommandOptions};

/// Applies pending database migrations.
pub trait Migrator {
    fn apply(&self) -> Result<ActionOutput>;
}

/// Shell-backed migrator wrapping the project's migration command
/// (e.g., the framework's migrate CLI).
#[derive(Debug, Clone)]
pub struct ShellMigrator {
    command: String,
    cwd: PathBuf,
    env: HashMap<String, String>,
}

impl ShellMigrator {
    pub fn new(command: impl Into<String>, cwd: PathBuf, env: HashMap<String, String>) -> Self {
        Self {
            command: command.into(),
            cwd,
            env,
        }
    }

    /// The migration command this collaborator runs.
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Migrator for ShellMigrator {
    fn apply(&self) -> Result<ActionOutput> {
        let options = CommandOptions {
            cwd: Some(self.cwd.clone()),
            env: self.env.clone(),
            capture_stdout: true,
            capture_stderr: true,
        };

        let result = execute(&self.command, &options)?;
        Ok(ActionOutput::from_command(&result))
    }
}
