//! Environment probing collaborator.

use std::path::{Path, PathBuf};

use crate::config::CapabilityCheck;
use crate::shell::execute_check;

/// Answers boolean questions about the host environment.
///
/// Used by the prerequisite checker, by `applicable_when` step guards,
/// and by alternative-selection probes.
pub trait Probe {
    /// True iff the capability is present.
    fn check(&self, capability: &CapabilityCheck) -> bool;
}

/// Probe backed by the shell and the filesystem, rooted at the project
/// directory so relative paths and commands resolve consistently.
#[derive(Debug, Clone)]
pub struct ShellProbe {
    project_root: PathBuf,
}

impl ShellProbe {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }
}

impl Probe for ShellProbe {
    fn check(&self, capability: &CapabilityCheck) -> bool {
        match capability {
            CapabilityCheck::FileExists { path } => {
                let full = if Path::new(path).is_absolute() {
                    PathBuf::from(path)
                } else {
                    self.project_root.join(path)
                };
                full.exists()
            }
            CapabilityCheck::CommandSucceeds { command } => {
                execute_check(command, Some(&self.project_root))
            }
        }
    }
}
