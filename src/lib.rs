//! groundwork - Idempotent, resumable project provisioning.
//!
//! groundwork replaces ad-hoc setup scripts with a declarative step plan
//! and an engine that remembers what already ran: every completed step
//! leaves a durable marker, so an interrupted run resumes from the next
//! incomplete step instead of starting over. Steps with more than one
//! viable strategy (say, MySQL with an SQLite fallback) declare ordered
//! alternatives and the engine records which one acted.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Plan loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`markers`] - Durable step completion markers
//! - [`prereq`] - Prerequisite checking
//! - [`provision`] - Collaborator interfaces for installers, file writers,
//!   probes, and migrations
//! - [`sequencer`] - Run orchestration, fallback resolution, reporting
//! - [`shell`] - Shell command execution
//! - [`steps`] - Step resolution, actions, and outcome classification
//! - [`ui`] - Terminal output and prompts
//!
//! # Example
//!
//! ```
//! use groundwork::config::Plan;
//! use groundwork::markers::MemoryMarkerStore;
//! use groundwork::provision::ShellProbe;
//! use groundwork::sequencer::{CancelToken, RunOptions, Sequencer};
//! use groundwork::steps::ResolvedStep;
//!
//! let plan: Plan = serde_yaml::from_str(
//!     "steps:\n  - name: hello\n    run: exit 0\n",
//! ).unwrap();
//!
//! let root = std::env::temp_dir();
//! let steps = ResolvedStep::resolve_all(&plan.steps, &plan.settings, &root).unwrap();
//! let probe = ShellProbe::new(root);
//! let sequencer = Sequencer::new(&steps, &plan.prerequisites, &probe);
//!
//! let mut markers = MemoryMarkerStore::new();
//! let report = sequencer
//!     .run(&mut markers, &RunOptions::default(), &CancelToken::new())
//!     .unwrap();
//! assert!(report.success());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod markers;
pub mod prereq;
pub mod provision;
pub mod sequencer;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{GroundworkError, Result};
