//! Shell command execution.

pub mod command;

pub use command::{execute, execute_check, is_ci, CommandOptions, CommandResult};
