//! Step outcome classification.

/// Classified result of attempting a step once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The step's action completed; a marker will be written.
    Success,

    /// A marker already existed; nothing ran.
    SkippedAlreadyDone,

    /// The step does not apply to this environment (e.g., optional tool
    /// absent). No marker is written, so applicability is re-checked on
    /// the next run.
    SkippedNotApplicable,

    /// The action failed but the step is best-effort; fallback alternatives
    /// may absorb this. Promoted to [`Outcome::FatalFailure`] when none exist.
    RecoverableFailure,

    /// The action failed and the run must halt. Markers for earlier steps
    /// stay intact so the next invocation resumes.
    FatalFailure,
}

impl Outcome {
    /// Whether this outcome lets the run continue to the next step.
    pub fn proceeds(&self) -> bool {
        matches!(
            self,
            Outcome::Success | Outcome::SkippedAlreadyDone | Outcome::SkippedNotApplicable
        )
    }

    /// Whether this outcome represents a failure of the step's action.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::RecoverableFailure | Outcome::FatalFailure)
    }

    /// Get a display character for this outcome.
    pub fn display_char(&self) -> char {
        match self {
            Outcome::Success => '✓',
            Outcome::SkippedAlreadyDone => '⊘',
            Outcome::SkippedNotApplicable => '○',
            Outcome::RecoverableFailure => '!',
            Outcome::FatalFailure => '✗',
        }
    }

    /// Stable identifier used in JSON reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::SkippedAlreadyDone => "skipped_already_done",
            Outcome::SkippedNotApplicable => "skipped_not_applicable",
            Outcome::RecoverableFailure => "recoverable_failure",
            Outcome::FatalFailure => "fatal_failure",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Outcome::Success => "success",
            Outcome::SkippedAlreadyDone => "skipped (already done)",
            Outcome::SkippedNotApplicable => "skipped (not applicable)",
            Outcome::RecoverableFailure => "recoverable failure",
            Outcome::FatalFailure => "fatal failure",
        };
        write!(f, "{}", s)
    }
}
