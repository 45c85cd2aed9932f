//! Plan file discovery and loading.

use crate::config::schema::Plan;
use crate::error::{GroundworkError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default plan location relative to the project root.
pub const DEFAULT_PLAN_PATH: &str = ".groundwork/plan.yml";

/// Resolve the plan file path for a project.
///
/// An explicit `--config` path wins; otherwise `.groundwork/plan.yml`
/// under the project root.
pub fn plan_path(project_root: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => project_root.join(path),
        None => project_root.join(DEFAULT_PLAN_PATH),
    }
}

/// Load and parse a plan file.
pub fn load_plan(path: &Path) -> Result<Plan> {
    if !path.exists() {
        return Err(GroundworkError::PlanNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let plan: Plan =
        serde_yaml::from_str(&content).map_err(|e| GroundworkError::PlanParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(plan)
}

/// Load the plan for a project, running validation.
pub fn load_project_plan(project_root: &Path, explicit: Option<&Path>) -> Result<Plan> {
    let path = plan_path(project_root, explicit);
    let plan = load_plan(&path)?;
    super::validator::validate(&plan)?;
    Ok(plan)
}
