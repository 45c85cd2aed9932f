//! Fallback strategy resolution.
//!
//! For steps that declare `alternatives`, the resolver tries each strategy
//! in declared order: probe first (when one exists), then the action. The
//! first strategy that succeeds is chosen and recorded. If none succeed the
//! step fails fatally with every attempt's reason attached; an unvalidated
//! default is never picked silently.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{GroundworkError, Result};
use crate::provision::Probe;
use crate::steps::runner::ExecutionOptions;
use crate::steps::{Outcome, ResolvedStep};

/// Result of resolving a step's alternatives.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The winning strategy, `None` only in dry-run previews.
    pub chosen: Option<String>,

    /// Classified outcome (always proceeds; exhaustion is an error).
    pub outcome: Outcome,

    /// Detail for the run report.
    pub message: Option<String>,

    /// Total time across attempts.
    pub duration: Duration,
}

/// Tries a step's alternatives in order.
pub struct FallbackResolver<'a> {
    probe: &'a dyn Probe,
}

impl<'a> FallbackResolver<'a> {
    /// Create a resolver backed by the given environment probe.
    pub fn new(probe: &'a dyn Probe) -> Self {
        Self { probe }
    }

    /// Resolve which alternative acts for `step` and run it.
    ///
    /// Returns [`GroundworkError::AllAlternativesExhausted`] when every
    /// strategy fails; the error message lists each attempt and why it
    /// was rejected.
    pub fn resolve(&self, step: &ResolvedStep, options: &ExecutionOptions) -> Result<Resolution> {
        let start = Instant::now();

        if let Some(ref check) = step.applicable_when {
            if !self.probe.check(check) {
                return Ok(Resolution {
                    chosen: None,
                    outcome: Outcome::SkippedNotApplicable,
                    message: Some("applicability probe failed".to_string()),
                    duration: start.elapsed(),
                });
            }
        }

        if options.dry_run {
            let names: Vec<_> = step.alternatives.iter().map(|a| a.name.as_str()).collect();
            return Ok(Resolution {
                chosen: None,
                outcome: Outcome::Success,
                message: Some(format!("would try alternatives: {}", names.join(", "))),
                duration: start.elapsed(),
            });
        }

        let mut attempts: Vec<String> = Vec::new();

        for alt in &step.alternatives {
            if let Some(ref probe_check) = alt.probe {
                if !self.probe.check(probe_check) {
                    debug!(
                        "step '{}': alternative '{}' rejected by probe",
                        step.name, alt.name
                    );
                    attempts.push(format!("{}: probe failed", alt.name));
                    continue;
                }
            }

            match alt.action.run() {
                Ok(output) if output.success => {
                    return Ok(Resolution {
                        chosen: Some(alt.name.clone()),
                        outcome: Outcome::Success,
                        message: None,
                        duration: start.elapsed(),
                    });
                }
                Ok(output) => {
                    let reason = output.detail.unwrap_or_else(|| "failed".to_string());
                    attempts.push(format!("{}: {}", alt.name, reason));
                }
                Err(e) => {
                    attempts.push(format!("{}: {}", alt.name, e));
                }
            }
        }

        Err(GroundworkError::AllAlternativesExhausted {
            step: step.name.clone(),
            attempts: attempts.join("; "),
        })
    }
}
