//! Output mode and writer.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including per-step detail.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show final status only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows per-step status lines.
    pub fn shows_steps(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode shows extra detail.
    pub fn shows_detail(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}

/// Output writer that respects the selected mode.
///
/// Errors always go to stderr regardless of mode.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    /// Create a new output writer.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Write a per-step status line.
    pub fn step(&self, msg: &str) {
        if self.mode.shows_steps() {
            println!("{}", msg);
        }
    }

    /// Write a line shown in every mode.
    pub fn println(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Write extra detail (verbose mode only).
    pub fn detail(&self, msg: &str) {
        if self.mode.shows_detail() {
            println!("{}", msg);
        }
    }

    /// Write an error line to stderr.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", console::style(msg).red());
    }
}
