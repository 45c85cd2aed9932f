//! Framework/package installation collaborator.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Result;
use crate::provision::ActionOutput;
use crate::shell::{execute, CommandOptions};

/// Installs a named target (a framework skeleton, a package).
pub trait Installer {
    /// Run the installation for `target`.
    fn install(&self, target: &str) -> Result<ActionOutput>;
}

/// Shell-backed installer driven by a command template.
///
/// The template comes from the plan's `settings.installer`; `{target}` is
/// replaced with the step's install target.
#[derive(Debug, Clone)]
pub struct ShellInstaller {
    template: String,
    cwd: PathBuf,
    env: HashMap<String, String>,
}

impl ShellInstaller {
    /// Placeholder replaced with the install target.
    pub const TARGET_PLACEHOLDER: &'static str = "{target}";

    pub fn new(template: impl Into<String>, cwd: PathBuf, env: HashMap<String, String>) -> Self {
        Self {
            template: template.into(),
            cwd,
            env,
        }
    }

    /// The concrete command that would run for `target`.
    pub fn command_for(&self, target: &str) -> String {
        self.template.replace(Self::TARGET_PLACEHOLDER, target)
    }
}

impl Installer for ShellInstaller {
    fn install(&self, target: &str) -> Result<ActionOutput> {
        let command = self.command_for(target);
        let options = CommandOptions {
            cwd: Some(self.cwd.clone()),
            env: self.env.clone(),
            capture_stdout: true,
            capture_stderr: true,
        };

        let result = execute(&command, &options)?;
        Ok(ActionOutput::from_command(&result))
    }
}
