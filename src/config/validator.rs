//! Plan validation.
//!
//! Enforces the structural invariants the sequencer relies on:
//! unique step names, exactly one action per step, and an installer
//! template whenever an `install:` step exists.

use crate::config::schema::Plan;
use crate::error::{GroundworkError, Result};
use std::collections::HashSet;

/// Validate a parsed plan.
///
/// Returns the first violation found; the CLI surfaces it before
/// anything executes.
pub fn validate(plan: &Plan) -> Result<()> {
    let mut seen = HashSet::new();

    for step in &plan.steps {
        if step.name.trim().is_empty() {
            return Err(GroundworkError::PlanValidationError {
                message: "every step needs a non-empty name".to_string(),
            });
        }

        // Step names double as marker file names
        if !is_marker_safe(&step.name) {
            return Err(GroundworkError::PlanValidationError {
                message: format!(
                    "step name '{}' may only contain letters, digits, '.', '_' and '-'",
                    step.name
                ),
            });
        }

        if !seen.insert(step.name.as_str()) {
            return Err(GroundworkError::PlanValidationError {
                message: format!("duplicate step name '{}'", step.name),
            });
        }

        match step.action_count() {
            0 => {
                return Err(GroundworkError::PlanValidationError {
                    message: format!(
                        "step '{}' has no action (expected one of: run, install, write_file, migrate, alternatives)",
                        step.name
                    ),
                });
            }
            1 => {}
            n => {
                return Err(GroundworkError::PlanValidationError {
                    message: format!("step '{}' declares {} actions, expected exactly one", step.name, n),
                });
            }
        }

        if !step.alternatives.is_empty() {
            let mut alt_seen = HashSet::new();
            for alt in &step.alternatives {
                if alt.name.trim().is_empty() {
                    return Err(GroundworkError::PlanValidationError {
                        message: format!("step '{}' has an alternative with no name", step.name),
                    });
                }
                if !alt_seen.insert(alt.name.as_str()) {
                    return Err(GroundworkError::PlanValidationError {
                        message: format!(
                            "step '{}' has duplicate alternative '{}'",
                            step.name, alt.name
                        ),
                    });
                }
            }
        }

        if step.install.is_some() && plan.settings.installer.is_none() {
            return Err(GroundworkError::PlanValidationError {
                message: format!(
                    "step '{}' uses install: but settings.installer is not set",
                    step.name
                ),
            });
        }
    }

    for prereq in &plan.prerequisites {
        if prereq.name.trim().is_empty() {
            return Err(GroundworkError::PlanValidationError {
                message: "every prerequisite needs a non-empty name".to_string(),
            });
        }
    }

    Ok(())
}

fn is_marker_safe(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
