//! The `status` command: show each step's completion state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::cli::args::StatusArgs;
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::config::load_project_plan;
use crate::error::{GroundworkError, Result};
use crate::markers::{FileMarkerStore, MarkerStore};
use crate::ui::Output;

/// Shows marker state for every plan step.
pub struct StatusCommand {
    project_root: PathBuf,
    plan_override: Option<PathBuf>,
    args: StatusArgs,
}

impl StatusCommand {
    pub fn new(project_root: &Path, plan_override: Option<&Path>, args: StatusArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            plan_override: plan_override.map(|p| p.to_path_buf()),
            args,
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let plan = load_project_plan(&self.project_root, self.plan_override.as_deref())?;
        let markers = FileMarkerStore::new(&self.project_root);

        let mut completed: HashMap<String, Option<DateTime<Utc>>> = markers
            .completed()?
            .into_iter()
            .map(|m| (m.step, m.completed_at))
            .collect();

        if self.args.json {
            let steps: Vec<_> = plan
                .steps
                .iter()
                .map(|step| {
                    let done = completed.remove(&step.name);
                    json!({
                        "step": &step.name,
                        "complete": done.is_some(),
                        "completed_at": done.flatten().map(|t| t.to_rfc3339()),
                    })
                })
                .collect();

            let stale: Vec<_> = completed.keys().cloned().collect();
            let value = json!({ "steps": steps, "stale_markers": stale });
            out.println(&serde_json::to_string_pretty(&value).map_err(|e| {
                GroundworkError::Other(anyhow::anyhow!("cannot serialize status: {}", e))
            })?);
            return Ok(CommandResult::success());
        }

        if let Some(ref app_name) = plan.app_name {
            out.println(&format!("{} setup status", app_name));
        }

        for step in &plan.steps {
            match completed.remove(&step.name) {
                Some(Some(at)) => out.println(&format!(
                    "✓ {} (completed {})",
                    step.name,
                    at.format("%Y-%m-%d %H:%M UTC")
                )),
                Some(None) => out.println(&format!("✓ {} (completed)", step.name)),
                None => out.println(&format!("○ {} (pending)", step.name)),
            }
        }

        // Markers whose steps left the plan
        for step in completed.keys() {
            out.println(&format!("? {} (marker exists, step not in plan)", step));
        }

        Ok(CommandResult::success())
    }
}
