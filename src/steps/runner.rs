//! Single-step execution and outcome classification.
//!
//! The runner wraps a step's action call and maps the raw result onto an
//! [`Outcome`] using the step's declared classification (critical vs
//! best-effort). It never retries; retry policy lives in a step's
//! `alternatives`, where it stays visible in the plan.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::provision::Probe;
use crate::steps::outcome::Outcome;
use crate::steps::resolved::ResolvedStep;

/// Execution flags for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionOptions {
    /// Preview mode: report what would run without running it.
    pub dry_run: bool,
}

/// Result of one execution attempt.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Classified outcome.
    pub outcome: Outcome,

    /// Detail for the run report (failure reason, skip reason, dry-run
    /// preview).
    pub message: Option<String>,

    /// How long the attempt took.
    pub duration: Duration,
}

impl ExecutionResult {
    fn new(outcome: Outcome, message: Option<String>, duration: Duration) -> Self {
        Self {
            outcome,
            message,
            duration,
        }
    }
}

/// Executes single-action steps.
pub struct StepRunner<'a> {
    probe: &'a dyn Probe,
}

impl<'a> StepRunner<'a> {
    /// Create a runner backed by the given environment probe.
    pub fn new(probe: &'a dyn Probe) -> Self {
        Self { probe }
    }

    /// Execute a step's primary action and classify the result.
    ///
    /// Steps with alternatives never reach this; the fallback resolver
    /// owns those.
    pub fn execute(&self, step: &ResolvedStep, options: &ExecutionOptions) -> ExecutionResult {
        let start = Instant::now();

        if let Some(ref check) = step.applicable_when {
            if !self.probe.check(check) {
                return ExecutionResult::new(
                    Outcome::SkippedNotApplicable,
                    Some("applicability probe failed".to_string()),
                    start.elapsed(),
                );
            }
        }

        if options.dry_run {
            return ExecutionResult::new(
                Outcome::Success,
                Some(format!("would run: {}", step.describe())),
                start.elapsed(),
            );
        }

        let Some(action) = step.action.as_ref() else {
            // Resolution guarantees an action when there are no alternatives
            return ExecutionResult::new(
                Outcome::FatalFailure,
                Some("step has no primary action".to_string()),
                start.elapsed(),
            );
        };

        let output = match action.run() {
            Ok(output) => output,
            Err(e) => {
                warn!("step '{}' could not be attempted: {}", step.name, e);
                return ExecutionResult::new(
                    self.classify_failure(step),
                    Some(e.to_string()),
                    start.elapsed(),
                );
            }
        };

        if output.success {
            ExecutionResult::new(Outcome::Success, None, start.elapsed())
        } else {
            ExecutionResult::new(self.classify_failure(step), output.detail, start.elapsed())
        }
    }

    fn classify_failure(&self, step: &ResolvedStep) -> Outcome {
        if step.best_effort {
            Outcome::RecoverableFailure
        } else {
            Outcome::FatalFailure
        }
    }
}
