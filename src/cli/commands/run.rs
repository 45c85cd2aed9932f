//! The `run` command: execute all pending steps.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::{ReportFormat, RunArgs};
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::config::load_project_plan;
use crate::error::{GroundworkError, Result};
use crate::markers::FileMarkerStore;
use crate::provision::ShellProbe;
use crate::sequencer::{CancelToken, RunOptions, RunProgress, Sequencer};
use crate::shell::{execute, is_ci, CommandOptions};
use crate::steps::ResolvedStep;
use crate::ui::{confirm, stdout_is_terminal, Output};

/// Runs the plan's pending steps in order.
pub struct RunCommand {
    project_root: PathBuf,
    plan_override: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    pub fn new(project_root: &Path, plan_override: Option<&Path>, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            plan_override: plan_override.map(|p| p.to_path_buf()),
            args,
        }
    }

    fn is_interactive(&self) -> bool {
        !self.args.non_interactive && !is_ci() && stdout_is_terminal()
    }
}

impl Command for RunCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let plan = load_project_plan(&self.project_root, self.plan_override.as_deref())?;
        let steps = ResolvedStep::resolve_all(&plan.steps, &plan.settings, &self.project_root)?;

        let probe = ShellProbe::new(self.project_root.clone());
        let sequencer = Sequencer::new(&steps, &plan.prerequisites, &probe);
        let mut markers = FileMarkerStore::new(&self.project_root);

        let options = RunOptions {
            dry_run: self.args.dry_run,
            only: self.args.only.iter().cloned().collect::<HashSet<_>>(),
            force: self.args.force.iter().cloned().collect::<HashSet<_>>(),
            keep_markers: self.args.keep_markers || plan.settings.keep_markers,
        };

        let json_report = self.args.report == Some(ReportFormat::Json);

        if !json_report {
            if let Some(ref app_name) = plan.app_name {
                out.step(&format!("Provisioning {}", app_name));
            }
            if self.args.dry_run {
                out.step("(dry-run mode: nothing will be executed)");
            }
        }

        let cancel = CancelToken::new();
        let result = sequencer.run_with_progress(&mut markers, &options, &cancel, |progress| {
            match progress {
                RunProgress::StepStarting { name, index, total } => {
                    debug!("step {}/{}: {}", index + 1, total, name);
                }
                RunProgress::StepFinished { entry } => {
                    if !json_report {
                        out.step(&entry.summary_line());
                    }
                }
            }
        });

        let report = match result {
            Ok(report) => report,
            Err(GroundworkError::PrerequisiteMissing { missing }) => {
                out.error("Missing prerequisites:");
                for name in &missing {
                    out.error(&format!("  ✗ {}", name));
                }
                out.error("Install the missing tools and run the same command again.");
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        if json_report {
            out.println(&serde_json::to_string_pretty(&report.to_json()).map_err(
                |e| GroundworkError::Other(anyhow::anyhow!("cannot serialize report: {}", e)),
            )?);
        } else {
            out.println("");
            out.println(&report.summary_line());
            if let Some(hint) = report.resume_hint() {
                out.println(&hint);
            }
        }

        // End-of-run convenience, outside the sequencing core
        if report.success() && !self.args.dry_run && !json_report {
            if let Some(ref dev_server) = plan.settings.dev_server {
                if self.is_interactive() && confirm("Start the development server?", false)? {
                    out.println(&format!("Starting: {}", dev_server));
                    let cmd_options = CommandOptions {
                        cwd: Some(self.project_root.clone()),
                        env: plan.settings.env.clone(),
                        capture_stdout: false,
                        capture_stderr: false,
                    };
                    execute(dev_server, &cmd_options)?;
                }
            }
        }

        if report.success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(report.exit_code()))
        }
    }
}
