//! Plan schema definitions for groundwork.
//!
//! This module contains all the struct definitions that map to
//! the YAML plan file format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root structure for `.groundwork/plan.yml`.
///
/// Steps are a sequence, not a map: declaration order is execution order,
/// and later steps may assume the effects of earlier ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    /// Application name (for display purposes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Global settings
    pub settings: Settings,

    /// Capability checks that must all pass before any step runs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<PrerequisiteConfig>,

    /// Ordered step definitions
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// Global settings that apply to the whole plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Global environment variables (merged into every step's env)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,

    /// Installer command template; `{target}` is replaced with the
    /// step's `install:` value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installer: Option<String>,

    /// Command offered by the end-of-run "start development server?" prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<String>,

    /// Keep completion markers after a fully successful run
    /// (default: a successful run wipes them for a clean next install)
    #[serde(default, skip_serializing_if = "is_false")]
    pub keep_markers: bool,
}

/// A named prerequisite with its capability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrerequisiteConfig {
    /// Requirement name shown when missing (e.g., "composer")
    pub name: String,

    /// The boolean probe that decides whether it is satisfied
    pub check: CapabilityCheck,
}

/// A boolean probe against the host environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CapabilityCheck {
    /// Check if a file or directory exists
    FileExists {
        /// Path to check (relative to project root)
        path: String,
    },

    /// Check if a command succeeds (exit code 0)
    CommandSucceeds {
        /// Command to run
        command: String,
    },
}

/// One provisioning step.
///
/// Exactly one action field must be set: `run`, `install`, `write_file`,
/// `migrate`, or `alternatives` (enforced by the validator).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Unique step name; doubles as the completion-marker key
    pub name: String,

    /// Step title (for display)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Shell command to execute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,

    /// Install target, handed to the `settings.installer` template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<String>,

    /// Write a file with the given full content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_file: Option<WriteFileConfig>,

    /// Migration command applied through the migration collaborator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrate: Option<String>,

    /// Ordered fallback strategies; first whose probe + action succeeds wins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<AlternativeConfig>,

    /// A failure here is recoverable rather than fatal
    #[serde(default, skip_serializing_if = "is_false")]
    pub best_effort: bool,

    /// Probe command; when it fails the step is skipped as not applicable
    /// (no marker written, re-checked on the next run)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable_when: Option<String>,

    /// Step-specific environment variables
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

impl StepConfig {
    /// Count the action fields that are set.
    pub fn action_count(&self) -> usize {
        usize::from(self.run.is_some())
            + usize::from(self.install.is_some())
            + usize::from(self.write_file.is_some())
            + usize::from(self.migrate.is_some())
            + usize::from(!self.alternatives.is_empty())
    }
}

/// Target file for a `write_file` step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteFileConfig {
    /// Destination path (relative to project root)
    pub path: String,

    /// Full desired file content
    pub content: String,
}

/// One fallback strategy for a step with alternatives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeConfig {
    /// Strategy name recorded in the run report (e.g., "mysql", "sqlite")
    pub name: String,

    /// Optional probe; a failing probe skips this alternative without
    /// running its command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<String>,

    /// Shell command this strategy executes
    pub run: String,
}

fn is_false(v: &bool) -> bool {
    !v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_plan_parses() {
        let plan: Plan = serde_yaml::from_str(
            r#"
            steps:
              - name: hello
                run: echo hello
        "#,
        )
        .unwrap();

        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].name, "hello");
        assert_eq!(plan.steps[0].run.as_deref(), Some("echo hello"));
    }

    #[test]
    fn steps_preserve_declaration_order() {
        let plan: Plan = serde_yaml::from_str(
            r#"
            steps:
              - name: third
                run: echo 3
              - name: first
                run: echo 1
              - name: second
                run: echo 2
        "#,
        )
        .unwrap();

        let names: Vec<_> = plan.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }

    #[test]
    fn alternatives_parse_in_order() {
        let plan: Plan = serde_yaml::from_str(
            r#"
            steps:
              - name: create_database
                alternatives:
                  - name: mysql
                    probe: mysqladmin ping
                    run: mysql -e 'CREATE DATABASE app'
                  - name: sqlite
                    run: touch database/database.sqlite
        "#,
        )
        .unwrap();

        let step = &plan.steps[0];
        assert_eq!(step.alternatives.len(), 2);
        assert_eq!(step.alternatives[0].name, "mysql");
        assert!(step.alternatives[0].probe.is_some());
        assert_eq!(step.alternatives[1].name, "sqlite");
        assert!(step.alternatives[1].probe.is_none());
    }

    #[test]
    fn prerequisites_parse_with_tagged_checks() {
        let plan: Plan = serde_yaml::from_str(
            r#"
            prerequisites:
              - name: php
                check:
                  type: command_succeeds
                  command: php --version
              - name: env_template
                check:
                  type: file_exists
                  path: .env.example
        "#,
        )
        .unwrap();

        assert_eq!(plan.prerequisites.len(), 2);
        assert!(matches!(
            plan.prerequisites[0].check,
            CapabilityCheck::CommandSucceeds { .. }
        ));
        assert!(matches!(
            plan.prerequisites[1].check,
            CapabilityCheck::FileExists { .. }
        ));
    }

    #[test]
    fn settings_defaults() {
        let plan: Plan = serde_yaml::from_str("steps: []").unwrap();
        assert!(plan.settings.env.is_empty());
        assert!(plan.settings.installer.is_none());
        assert!(plan.settings.dev_server.is_none());
        assert!(!plan.settings.keep_markers);
    }

    #[test]
    fn action_count_counts_each_kind() {
        let mut step = StepConfig {
            name: "s".into(),
            ..Default::default()
        };
        assert_eq!(step.action_count(), 0);

        step.run = Some("echo".into());
        assert_eq!(step.action_count(), 1);

        step.migrate = Some("migrate".into());
        assert_eq!(step.action_count(), 2);
    }

    #[test]
    fn write_file_step_parses() {
        let plan: Plan = serde_yaml::from_str(
            r#"
            steps:
              - name: write_env
                write_file:
                  path: .env
                  content: |
                    APP_ENV=local
        "#,
        )
        .unwrap();

        let wf = plan.steps[0].write_file.as_ref().unwrap();
        assert_eq!(wf.path, ".env");
        assert!(wf.content.contains("APP_ENV=local"));
    }
}
