//! The `reset` command: clear completion markers.

use std::path::{Path, PathBuf};

use crate::cli::args::ResetArgs;
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::error::Result;
use crate::markers::{FileMarkerStore, MarkerStore};
use crate::ui::Output;

/// Clears markers so steps re-execute on the next run.
pub struct ResetCommand {
    project_root: PathBuf,
    args: ResetArgs,
}

impl ResetCommand {
    pub fn new(project_root: &Path, args: ResetArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for ResetCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let mut markers = FileMarkerStore::new(&self.project_root);

        match &self.args.step {
            Some(step) => {
                if markers.is_complete(step)? {
                    markers.reset(step)?;
                    out.println(&format!("Cleared marker for '{}'.", step));
                } else {
                    out.println(&format!("No marker for '{}'; nothing to clear.", step));
                }
            }
            None => {
                let count = markers.completed()?.len();
                markers.reset_all()?;
                out.println(&format!(
                    "Cleared {} marker{}.",
                    count,
                    if count == 1 { "" } else { "s" }
                ));
            }
        }

        Ok(CommandResult::success())
    }
}
