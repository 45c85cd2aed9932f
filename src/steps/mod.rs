//! Step resolution and execution.
//!
//! This module provides the per-step half of the engine:
//!
//! - [`ResolvedStep`] - A plan step bound to its collaborators
//! - [`StepAction`] - The opaque unit of work a step performs
//! - [`StepRunner`] - Executes one action and classifies the result
//! - [`Outcome`] - The classified result of one attempt

pub mod action;
pub mod outcome;
pub mod resolved;
pub mod runner;

pub use action::{CommandAction, InstallAction, MigrateAction, StepAction, WriteFileAction};
pub use outcome::Outcome;
pub use resolved::{ResolvedAlternative, ResolvedStep};
pub use runner::{ExecutionOptions, ExecutionResult, StepRunner};
