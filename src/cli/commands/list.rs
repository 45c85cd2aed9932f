//! The `list` command: show the plan without executing anything.

use std::path::{Path, PathBuf};

use crate::cli::args::ListArgs;
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::config::load_project_plan;
use crate::error::Result;
use crate::ui::Output;

/// Prints step names, titles, and declared alternatives.
pub struct ListCommand {
    project_root: PathBuf,
    plan_override: Option<PathBuf>,
    #[allow(dead_code)]
    args: ListArgs,
}

impl ListCommand {
    pub fn new(project_root: &Path, plan_override: Option<&Path>, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            plan_override: plan_override.map(|p| p.to_path_buf()),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let plan = load_project_plan(&self.project_root, self.plan_override.as_deref())?;

        if !plan.prerequisites.is_empty() {
            out.println("Prerequisites:");
            for prereq in &plan.prerequisites {
                out.println(&format!("  {}", prereq.name));
            }
            out.println("");
        }

        out.println("Steps (in execution order):");
        for (index, step) in plan.steps.iter().enumerate() {
            let title = step.title.as_deref().unwrap_or(&step.name);
            if title == step.name {
                out.println(&format!("  {}. {}", index + 1, step.name));
            } else {
                out.println(&format!("  {}. {} — {}", index + 1, step.name, title));
            }

            for alt in &step.alternatives {
                out.println(&format!("       alternative: {}", alt.name));
            }
            if step.best_effort {
                out.println("       best-effort");
            }
        }

        Ok(CommandResult::success())
    }
}
