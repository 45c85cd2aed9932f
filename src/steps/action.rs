//! Step actions.
//!
//! An action is the unit of work a step performs, opaque to the sequencer:
//! `run() -> ActionOutput`. Concrete actions wrap the provisioning
//! collaborators so the core never shells out or touches files itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::provision::{ActionOutput, Installer, Migrator, TemplateWriter};
use crate::shell::{execute, CommandOptions};

/// The capability contract every step action satisfies.
pub trait StepAction {
    /// Human-readable description of what would run (dry-run, error text).
    fn describe(&self) -> String;

    /// Perform the work. Errors mean the action could not even be
    /// attempted (spawn failure); a completed-but-failed attempt is an
    /// unsuccessful [`ActionOutput`].
    fn run(&self) -> Result<ActionOutput>;
}

impl std::fmt::Debug for dyn StepAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StepAction({})", self.describe())
    }
}

/// Plain shell command action (`run:` steps and fallback alternatives).
pub struct CommandAction {
    command: String,
    cwd: PathBuf,
    env: HashMap<String, String>,
}

impl CommandAction {
    pub fn new(command: impl Into<String>, cwd: PathBuf, env: HashMap<String, String>) -> Self {
        Self {
            command: command.into(),
            cwd,
            env,
        }
    }
}

impl StepAction for CommandAction {
    fn describe(&self) -> String {
        self.command.clone()
    }

    fn run(&self) -> Result<ActionOutput> {
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

/// Installation action (`install:` steps).
pub struct InstallAction {
    installer: Box<dyn Installer>,
    target: String,
    description: String,
}

impl InstallAction {
    pub fn new(installer: Box<dyn Installer>, target: impl Into<String>, description: String) -> Self {
        Self {
            installer,
            target: target.into(),
            description,
        }
    }
}

impl StepAction for InstallAction {
    fn describe(&self) -> String {
        self.description.clone()
    }

    fn run(&self) -> Result<ActionOutput> {
        self.installer.install(&self.target)
    }
}

/// File emission action (`write_file:` steps).
pub struct WriteFileAction {
    writer: Box<dyn TemplateWriter>,
    path: PathBuf,
    content: String,
}

impl WriteFileAction {
    pub fn new(writer: Box<dyn TemplateWriter>, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            writer,
            path: path.into(),
            content: content.into(),
        }
    }
}

impl StepAction for WriteFileAction {
    fn describe(&self) -> String {
        format!("write {}", self.path.display())
    }

    fn run(&self) -> Result<ActionOutput> {
        self.writer.write_file(Path::new(&self.path), &self.content)
    }
}

/// Migration action (`migrate:` steps).
pub struct MigrateAction {
    migrator: Box<dyn Migrator>,
    description: String,
}

impl MigrateAction {
    pub fn new(migrator: Box<dyn Migrator>, description: String) -> Self {
        Self {
            migrator,
            description,
        }
    }
}

impl StepAction for MigrateAction {
    fn describe(&self) -> String {
        self.description.clone()
    }

    fn run(&self) -> Result<ActionOutput> {
        self.migrator.apply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::{FsTemplateWriter, ShellInstaller, ShellMigrator};
    use tempfile::TempDir;

    #[test]
    fn command_action_runs() {
        let temp = TempDir::new().unwrap();
        let action = CommandAction::new(
            "echo ok > done.txt",
            temp.path().to_path_buf(),
            HashMap::new(),
        );

        let output = action.run().unwrap();
        assert!(output.success);
        assert!(temp.path().join("done.txt").exists());
    }

    #[test]
    fn command_action_describe_is_the_command() {
        let action = CommandAction::new("echo hi", PathBuf::from("."), HashMap::new());
        assert_eq!(action.describe(), "echo hi");
    }

    #[test]
    fn command_action_reports_failure() {
        let temp = TempDir::new().unwrap();
        let action = CommandAction::new("exit 5", temp.path().to_path_buf(), HashMap::new());

        let output = action.run().unwrap();
        assert!(!output.success);
        assert!(output.detail.unwrap().contains("exit code 5"));
    }

    #[test]
    fn command_action_uses_env() {
        let temp = TempDir::new().unwrap();
        let mut env = HashMap::new();
        env.insert("APP_NAME".to_string(), "demo".to_string());

        let command = if cfg!(target_os = "windows") {
            "echo %APP_NAME% > name.txt"
        } else {
            "echo $APP_NAME > name.txt"
        };
        let action = CommandAction::new(command, temp.path().to_path_buf(), env);
        action.run().unwrap();

        let content = std::fs::read_to_string(temp.path().join("name.txt")).unwrap();
        assert!(content.contains("demo"));
    }

    #[test]
    fn install_action_delegates_to_installer() {
        let temp = TempDir::new().unwrap();
        let installer = ShellInstaller::new(
            "echo {target} > installed.txt",
            temp.path().to_path_buf(),
            HashMap::new(),
        );
        let action = InstallAction::new(
            Box::new(installer),
            "acme/skeleton",
            "install acme/skeleton".to_string(),
        );

        let output = action.run().unwrap();
        assert!(output.success);
        assert!(temp.path().join("installed.txt").exists());
    }

    #[test]
    fn write_file_action_delegates_to_writer() {
        let temp = TempDir::new().unwrap();
        let writer = FsTemplateWriter::new(temp.path().to_path_buf());
        let action = WriteFileAction::new(Box::new(writer), ".env", "APP_ENV=local\n");

        let output = action.run().unwrap();
        assert!(output.success);
        assert_eq!(action.describe(), "write .env");
    }

    #[test]
    fn migrate_action_delegates_to_migrator() {
        let temp = TempDir::new().unwrap();
        let migrator = ShellMigrator::new("exit 0", temp.path().to_path_buf(), HashMap::new());
        let action = MigrateAction::new(Box::new(migrator), "run migrations".to_string());

        let output = action.run().unwrap();
        assert!(output.success);
    }
}
