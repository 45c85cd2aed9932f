//! Run orchestration.
//!
//! The sequencer owns one invocation end to end: prerequisite gate, the
//! ordered walk over the step list, marker queries and commits, fallback
//! dispatch, and the aggregated [`RunReport`].

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::PrerequisiteConfig;
use crate::error::{GroundworkError, Result};
use crate::markers::MarkerStore;
use crate::prereq::PrerequisiteChecker;
use crate::provision::Probe;
use crate::sequencer::cancel::CancelToken;
use crate::sequencer::fallback::FallbackResolver;
use crate::sequencer::report::{ReportEntry, RunReport, RunStatus};
use crate::steps::runner::ExecutionOptions;
use crate::steps::{Outcome, ResolvedStep, StepRunner};

/// Options for one sequencer invocation.
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Preview commands without executing or writing markers.
    pub dry_run: bool,

    /// Only process these steps (empty = all).
    pub only: HashSet<String>,

    /// Bypass the marker check for these steps.
    pub force: HashSet<String>,

    /// Leave markers in place after a fully successful run.
    pub keep_markers: bool,
}

/// Progress events emitted while a run executes.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A step is about to be processed.
    StepStarting {
        name: &'a str,
        index: usize,
        total: usize,
    },
    /// A step reached a terminal state.
    StepFinished { entry: &'a ReportEntry },
}

/// Executes a resolved plan sequentially.
///
/// Strictly single-threaded: provisioning steps depend on the filesystem
/// and database state their predecessors produced.
pub struct Sequencer<'a> {
    steps: &'a [ResolvedStep],
    prerequisites: &'a [PrerequisiteConfig],
    probe: &'a dyn Probe,
}

impl<'a> Sequencer<'a> {
    /// Create a sequencer over an ordered step list.
    pub fn new(
        steps: &'a [ResolvedStep],
        prerequisites: &'a [PrerequisiteConfig],
        probe: &'a dyn Probe,
    ) -> Self {
        Self {
            steps,
            prerequisites,
            probe,
        }
    }

    /// Run all pending steps.
    pub fn run(
        &self,
        markers: &mut dyn MarkerStore,
        options: &RunOptions,
        cancel: &CancelToken,
    ) -> Result<RunReport> {
        self.run_with_progress(markers, options, cancel, |_| {})
    }

    /// Run all pending steps, emitting progress events.
    ///
    /// Returns `Err` only for failures that preclude a report:
    /// [`GroundworkError::PrerequisiteMissing`] (nothing executed). Step
    /// failures, marker failures, and exhausted alternatives abort the run
    /// but come back inside the report.
    pub fn run_with_progress(
        &self,
        markers: &mut dyn MarkerStore,
        options: &RunOptions,
        cancel: &CancelToken,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> Result<RunReport> {
        let start = Instant::now();

        // Prerequisite gate: abort before any mutation, listing every gap
        let checker = PrerequisiteChecker::new(self.probe);
        let missing = checker.check_all(self.prerequisites);
        if !missing.is_empty() {
            return Err(GroundworkError::PrerequisiteMissing { missing });
        }

        let runner = StepRunner::new(self.probe);
        let resolver = FallbackResolver::new(self.probe);
        let exec_options = ExecutionOptions {
            dry_run: options.dry_run,
        };

        let selected: Vec<&ResolvedStep> = self
            .steps
            .iter()
            .filter(|s| options.only.is_empty() || options.only.contains(&s.name))
            .collect();
        let total = selected.len();

        let mut entries: Vec<ReportEntry> = Vec::with_capacity(total);
        let mut status: Option<RunStatus> = None;

        for (index, step) in selected.into_iter().enumerate() {
            // Cancellation is honored only at step boundaries; markers for
            // finished steps are already committed
            if cancel.is_cancelled() {
                debug!("cancellation requested, stopping before '{}'", step.name);
                status = Some(RunStatus::Cancelled);
                break;
            }

            on_progress(RunProgress::StepStarting {
                name: &step.name,
                index,
                total,
            });

            let force = options.force.contains(&step.name);
            if !force {
                match markers.is_complete(&step.name) {
                    Ok(true) => {
                        let entry = ReportEntry {
                            step: step.name.clone(),
                            outcome: Outcome::SkippedAlreadyDone,
                            chosen_alternative: None,
                            message: None,
                            duration: Duration::ZERO,
                        };
                        on_progress(RunProgress::StepFinished { entry: &entry });
                        entries.push(entry);
                        continue;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        let entry = abort_entry(&step.name, e.to_string());
                        on_progress(RunProgress::StepFinished { entry: &entry });
                        entries.push(entry);
                        status = Some(RunStatus::AbortedAtStep(step.name.clone()));
                        break;
                    }
                }
            }

            let (mut outcome, chosen, mut message, duration) = if step.has_alternatives() {
                match resolver.resolve(step, &exec_options) {
                    Ok(res) => (res.outcome, res.chosen, res.message, res.duration),
                    Err(e) => (Outcome::FatalFailure, None, Some(e.to_string()), Duration::ZERO),
                }
            } else {
                let result = runner.execute(step, &exec_options);
                (result.outcome, None, result.message, result.duration)
            };

            // A recoverable failure with nowhere to fall back to is fatal
            if outcome == Outcome::RecoverableFailure {
                outcome = Outcome::FatalFailure;
                let reason = message.unwrap_or_else(|| "failed".to_string());
                message = Some(format!("{} (no alternatives to fall back to)", reason));
            }

            if outcome == Outcome::Success && !options.dry_run {
                if let Err(e) = markers.mark_complete(&step.name) {
                    // The action succeeded but resumability is now suspect;
                    // halting beats pretending the marker exists
                    let entry = abort_entry(
                        &step.name,
                        format!("completed, but marker write failed: {}", e),
                    );
                    on_progress(RunProgress::StepFinished { entry: &entry });
                    entries.push(entry);
                    status = Some(RunStatus::AbortedAtStep(step.name.clone()));
                    break;
                }
            }

            let entry = ReportEntry {
                step: step.name.clone(),
                outcome,
                chosen_alternative: chosen,
                message,
                duration,
            };
            on_progress(RunProgress::StepFinished { entry: &entry });

            let fatal = entry.outcome == Outcome::FatalFailure;
            entries.push(entry);

            if fatal {
                status = Some(RunStatus::AbortedAtStep(step.name.clone()));
                break;
            }
        }

        let status = status.unwrap_or(RunStatus::CompletedAllSteps);

        // A fully successful full run leaves no stale markers behind, so the
        // next invocation provisions from scratch
        if status == RunStatus::CompletedAllSteps
            && !options.dry_run
            && !options.keep_markers
            && options.only.is_empty()
        {
            if let Err(e) = markers.reset_all() {
                warn!("could not clean up completion markers: {}", e);
            }
        }

        Ok(RunReport {
            entries,
            status,
            duration: start.elapsed(),
        })
    }
}

fn abort_entry(step: &str, message: String) -> ReportEntry {
    ReportEntry {
        step: step.to_string(),
        outcome: Outcome::FatalFailure,
        chosen_alternative: None,
        message: Some(message),
        duration: Duration::ZERO,
    }
}
