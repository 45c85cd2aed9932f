//! The `init` command: write a starter plan.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::config::DEFAULT_PLAN_PATH;
use crate::error::Result;
use crate::ui::Output;

const STARTER_PLAN: &str = r#"# groundwork plan
# Steps run top to bottom; each records a completion marker on success so
# interrupted runs resume where they left off.

app_name: My App

settings:
  # installer: "composer create-project {target} ."
  # dev_server: "php -S localhost:8000 -t public"
  env: {}

prerequisites: []
#  - name: php
#    check:
#      type: command_succeeds
#      command: php --version

steps:
  - name: copy_env
    title: Copy environment template
    run: cp .env.example .env

  - name: install_dependencies
    title: Install dependencies
    run: echo "replace with your package manager command"

  - name: create_database
    title: Create the database
    alternatives:
      - name: mysql
        probe: mysqladmin ping --silent
        run: mysql -e 'CREATE DATABASE IF NOT EXISTS app'
      - name: sqlite
        run: touch database/database.sqlite

  - name: run_migrations
    title: Apply database migrations
    migrate: echo "replace with your migration command"
"#;

/// Writes `.groundwork/plan.yml` for a new project.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for InitCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let path = self.project_root.join(DEFAULT_PLAN_PATH);

        if path.exists() && !self.args.force {
            out.error(&format!(
                "A plan already exists at {}. Use --force to overwrite.",
                path.display()
            ));
            return Ok(CommandResult::failure(1));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, STARTER_PLAN)?;

        out.println(&format!("Wrote {}", path.display()));
        out.println("Edit the steps for your project, then run `groundwork`.");

        Ok(CommandResult::success())
    }
}
