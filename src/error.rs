//! Error types for groundwork operations.
//!
//! This module defines [`GroundworkError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `GroundworkError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `GroundworkError::Other`) for unexpected errors
//! - All errors should provide actionable messages for operators

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for groundwork operations.
#[derive(Debug, Error)]
pub enum GroundworkError {
    /// Plan file not found at expected location.
    #[error("No plan found: {path}")]
    PlanNotFound { path: PathBuf },

    /// Failed to parse plan file.
    #[error("Failed to parse plan at {path}: {message}")]
    PlanParseError { path: PathBuf, message: String },

    /// Invalid plan structure or values.
    #[error("Invalid plan: {message}")]
    PlanValidationError { message: String },

    /// One or more prerequisites are not satisfied; nothing was executed.
    #[error("Missing prerequisites: {}", .missing.join(", "))]
    PrerequisiteMissing { missing: Vec<String> },

    /// Every declared alternative for a step failed.
    #[error("Step '{step}': all alternatives exhausted ({attempts})")]
    AllAlternativesExhausted { step: String, attempts: String },

    /// The marker store could not be read or written. Always fatal:
    /// proceeding past a failed marker write would corrupt resumability.
    #[error("Marker store error at {path}: {source}")]
    MarkerStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Shell command could not be spawned.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for groundwork operations.
pub type Result<T> = std::result::Result<T, GroundworkError>;
