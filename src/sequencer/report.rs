//! Run reporting.
//!
//! A [`RunReport`] is produced once per sequencer invocation and never
//! persisted: it is the return value and the printed summary. Durable
//! state lives in the marker store alone.

use std::time::Duration;

use serde_json::json;

use crate::steps::Outcome;

/// One line of the report: what happened to one step.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// Step name.
    pub step: String,

    /// Classified outcome.
    pub outcome: Outcome,

    /// Which alternative acted, for fallback steps.
    pub chosen_alternative: Option<String>,

    /// Failure reason, skip reason, or dry-run preview.
    pub message: Option<String>,

    /// Time spent on this step.
    pub duration: Duration,
}

impl ReportEntry {
    /// Generate the one-line summary for display.
    pub fn summary_line(&self) -> String {
        let glyph = self.outcome.display_char();
        let mut line = format!("{} {}", glyph, self.step);

        if let Some(ref alt) = self.chosen_alternative {
            line.push_str(&format!(" [{}]", alt));
        }

        match self.outcome {
            Outcome::Success => {
                if let Some(ref msg) = self.message {
                    line.push_str(&format!(" ({})", msg));
                } else {
                    line.push_str(&format!(" ({})", format_duration(self.duration)));
                }
            }
            Outcome::SkippedAlreadyDone => line.push_str(" (already complete)"),
            Outcome::SkippedNotApplicable => {
                let reason = self.message.as_deref().unwrap_or("not applicable");
                line.push_str(&format!(" ({})", reason));
            }
            Outcome::RecoverableFailure | Outcome::FatalFailure => {
                let reason = self.message.as_deref().unwrap_or("unknown error");
                line.push_str(&format!(" - {}", reason));
            }
        }

        line
    }
}

/// Whole-run outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Every step reached a terminal non-failure state.
    CompletedAllSteps,

    /// A fatal failure halted the run at the named step.
    AbortedAtStep(String),

    /// Cancellation was honored at a step boundary.
    Cancelled,
}

/// Aggregated result of one sequencer invocation.
#[derive(Debug)]
pub struct RunReport {
    /// Per-step entries in execution order.
    pub entries: Vec<ReportEntry>,

    /// Whole-run outcome.
    pub status: RunStatus,

    /// Total wall-clock duration.
    pub duration: Duration,
}

impl RunReport {
    /// Whether the run completed all steps.
    pub fn success(&self) -> bool {
        self.status == RunStatus::CompletedAllSteps
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    /// Count of steps that actually executed (not skipped).
    pub fn executed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == Outcome::Success)
            .count()
    }

    /// Count of steps skipped for any reason.
    pub fn skipped_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome,
                    Outcome::SkippedAlreadyDone | Outcome::SkippedNotApplicable
                )
            })
            .count()
    }

    /// Summary line for the end of the run.
    pub fn summary_line(&self) -> String {
        match &self.status {
            RunStatus::CompletedAllSteps => format!(
                "Setup complete! {} ran, {} skipped ({})",
                self.executed_count(),
                self.skipped_count(),
                format_duration(self.duration)
            ),
            RunStatus::AbortedAtStep(step) => format!("Setup aborted at step '{}'.", step),
            RunStatus::Cancelled => "Setup cancelled.".to_string(),
        }
    }

    /// The resume hint shown after an interrupted run.
    pub fn resume_hint(&self) -> Option<String> {
        match &self.status {
            RunStatus::CompletedAllSteps => None,
            RunStatus::AbortedAtStep(_) | RunStatus::Cancelled => Some(
                "Completed steps are recorded; run the same command again to resume \
                 from the next incomplete step."
                    .to_string(),
            ),
        }
    }

    /// Machine-readable form of the report.
    pub fn to_json(&self) -> serde_json::Value {
        let status = match &self.status {
            RunStatus::CompletedAllSteps => json!({ "completed": true }),
            RunStatus::AbortedAtStep(step) => {
                json!({ "completed": false, "aborted_at": step })
            }
            RunStatus::Cancelled => json!({ "completed": false, "cancelled": true }),
        };

        json!({
            "status": status,
            "duration_ms": self.duration.as_millis() as u64,
            "steps": self.entries.iter().map(|e| {
                json!({
                    "step": &e.step,
                    "outcome": e.outcome.as_str(),
                    "chosen_alternative": &e.chosen_alternative,
                    "message": &e.message,
                    "duration_ms": e.duration.as_millis() as u64,
                })
            }).collect::<Vec<_>>(),
        })
    }
}

/// Format a duration for display.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs == 0 {
        format!("{}ms", millis)
    } else if secs < 60 {
        format!("{}.{}s", secs, millis / 100)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}
