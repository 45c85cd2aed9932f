//! Plan loading, parsing, and validation.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{load_plan, load_project_plan, plan_path, DEFAULT_PLAN_PATH};
pub use schema::{
    AlternativeConfig, CapabilityCheck, Plan, PrerequisiteConfig, Settings, StepConfig,
    WriteFileConfig,
};
pub use validator::validate;
