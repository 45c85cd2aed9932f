//! Prerequisite evaluation.
//!
//! Runs every declared capability check before any step executes and
//! reports every missing requirement at once, so the operator can fix
//! them all in one pass instead of discovering them one failure at a
//! time.

use crate::config::PrerequisiteConfig;
use crate::provision::Probe;

/// Checks whether the host environment satisfies a plan's prerequisites.
///
/// The checker holds no domain knowledge; each requirement carries its own
/// boolean probe.
pub struct PrerequisiteChecker<'a> {
    probe: &'a dyn Probe,
}

impl<'a> PrerequisiteChecker<'a> {
    /// Create a checker backed by the given probe.
    pub fn new(probe: &'a dyn Probe) -> Self {
        Self { probe }
    }

    /// Evaluate every requirement. Returns the names of all that are
    /// missing, in declaration order; empty means the environment is ready.
    pub fn check_all(&self, requirements: &[PrerequisiteConfig]) -> Vec<String> {
        requirements
            .iter()
            .filter(|req| !self.probe.check(&req.check))
            .map(|req| req.name.clone())
            .collect()
    }
}
