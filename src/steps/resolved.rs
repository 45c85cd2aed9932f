//! Resolved step ready for execution.
//!
//! A ResolvedStep combines a plan's step config with the plan settings and
//! project root, producing a fully-specified step whose action is already
//! bound to its collaborator.

use std::collections::HashMap;
use std::path::Path;

use crate::config::{CapabilityCheck, Settings, StepConfig};
use crate::error::{GroundworkError, Result};
use crate::provision::{FsTemplateWriter, ShellInstaller, ShellMigrator};
use crate::steps::action::{
    CommandAction, InstallAction, MigrateAction, StepAction, WriteFileAction,
};

/// A fully resolved step.
pub struct ResolvedStep {
    /// Step name (marker key).
    pub name: String,

    /// Display title.
    pub title: String,

    /// The primary action. `None` iff the step declares alternatives.
    pub action: Option<Box<dyn StepAction>>,

    /// Ordered fallback strategies; empty for single-action steps.
    pub alternatives: Vec<ResolvedAlternative>,

    /// A failure is recoverable rather than fatal.
    pub best_effort: bool,

    /// Applicability probe; a failing probe skips the step without a marker.
    pub applicable_when: Option<CapabilityCheck>,
}

/// One resolved fallback strategy.
pub struct ResolvedAlternative {
    /// Strategy name recorded in the run report.
    pub name: String,

    /// Selection probe; `None` means "try the action directly".
    pub probe: Option<CapabilityCheck>,

    /// The strategy's action.
    pub action: Box<dyn StepAction>,
}

impl std::fmt::Debug for ResolvedStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedStep")
            .field("name", &self.name)
            .field("action", &self.action.as_ref().map(|a| a.describe()))
            .field(
                "alternatives",
                &self
                    .alternatives
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>(),
            )
            .field("best_effort", &self.best_effort)
            .finish()
    }
}

impl ResolvedStep {
    /// Resolve a step config against the plan settings and project root.
    ///
    /// The plan-level env is merged under the step-level env (step wins),
    /// and each action is bound to its shell/fs collaborator.
    pub fn from_config(
        config: &StepConfig,
        settings: &Settings,
        project_root: &Path,
    ) -> Result<Self> {
        let env = merge_env(&settings.env, &config.env);
        let root = project_root.to_path_buf();

        let action: Option<Box<dyn StepAction>> = if let Some(ref command) = config.run {
            Some(Box::new(CommandAction::new(
                command.clone(),
                root.clone(),
                env.clone(),
            )))
        } else if let Some(ref target) = config.install {
            let template =
                settings
                    .installer
                    .as_ref()
                    .ok_or_else(|| GroundworkError::PlanValidationError {
                        message: format!(
                            "step '{}' uses install: but settings.installer is not set",
                            config.name
                        ),
                    })?;
            let installer = ShellInstaller::new(template.clone(), root.clone(), env.clone());
            let description = installer.command_for(target);
            Some(Box::new(InstallAction::new(
                Box::new(installer),
                target.clone(),
                description,
            )))
        } else if let Some(ref wf) = config.write_file {
            let writer = FsTemplateWriter::new(root.clone());
            Some(Box::new(WriteFileAction::new(
                Box::new(writer),
                wf.path.clone(),
                wf.content.clone(),
            )))
        } else if let Some(ref command) = config.migrate {
            let migrator = ShellMigrator::new(command.clone(), root.clone(), env.clone());
            Some(Box::new(MigrateAction::new(
                Box::new(migrator),
                command.clone(),
            )))
        } else {
            None
        };

        let alternatives = config
            .alternatives
            .iter()
            .map(|alt| ResolvedAlternative {
                name: alt.name.clone(),
                probe: alt.probe.clone().map(|command| CapabilityCheck::CommandSucceeds { command }),
                action: Box::new(CommandAction::new(
                    alt.run.clone(),
                    root.clone(),
                    env.clone(),
                )) as Box<dyn StepAction>,
            })
            .collect::<Vec<_>>();

        if action.is_none() && alternatives.is_empty() {
            return Err(GroundworkError::PlanValidationError {
                message: format!("step '{}' has no action", config.name),
            });
        }

        Ok(Self {
            name: config.name.clone(),
            title: config.title.clone().unwrap_or_else(|| config.name.clone()),
            action,
            alternatives,
            best_effort: config.best_effort,
            applicable_when: config
                .applicable_when
                .clone()
                .map(|command| CapabilityCheck::CommandSucceeds { command }),
        })
    }

    /// Resolve every step in plan order.
    pub fn resolve_all(
        steps: &[StepConfig],
        settings: &Settings,
        project_root: &Path,
    ) -> Result<Vec<Self>> {
        steps
            .iter()
            .map(|s| Self::from_config(s, settings, project_root))
            .collect()
    }

    /// Whether this step selects among fallback alternatives.
    pub fn has_alternatives(&self) -> bool {
        !self.alternatives.is_empty()
    }

    /// What would run, for dry-run output.
    pub fn describe(&self) -> String {
        if let Some(ref action) = self.action {
            action.describe()
        } else {
            let names: Vec<_> = self.alternatives.iter().map(|a| a.name.as_str()).collect();
            format!("first viable of: {}", names.join(", "))
        }
    }
}

fn merge_env(
    global: &HashMap<String, String>,
    step: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut merged = global.clone();
    merged.extend(step.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings() -> Settings {
        Settings::default()
    }

    fn run_step(name: &str, command: &str) -> StepConfig {
        StepConfig {
            name: name.to_string(),
            run: Some(command.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_run_step() {
        let temp = TempDir::new().unwrap();
        let step =
            ResolvedStep::from_config(&run_step("hello", "echo hi"), &settings(), temp.path())
                .unwrap();

        assert_eq!(step.name, "hello");
        assert_eq!(step.title, "hello");
        assert!(step.action.is_some());
        assert!(!step.has_alternatives());
        assert_eq!(step.describe(), "echo hi");
    }

    #[test]
    fn title_defaults_to_name() {
        let temp = TempDir::new().unwrap();
        let mut config = run_step("write_env", "echo x");
        config.title = Some("Write environment file".to_string());

        let step = ResolvedStep::from_config(&config, &settings(), temp.path()).unwrap();
        assert_eq!(step.title, "Write environment file");
    }

    #[test]
    fn resolves_alternatives_in_order() {
        let temp = TempDir::new().unwrap();
        let config: StepConfig = serde_yaml::from_str(
            r#"
            name: create_database
            alternatives:
              - name: mysql
                probe: mysqladmin ping
                run: mysql -e 'CREATE DATABASE app'
              - name: sqlite
                run: touch database.sqlite
        "#,
        )
        .unwrap();

        let step = ResolvedStep::from_config(&config, &settings(), temp.path()).unwrap();
        assert!(step.action.is_none());
        assert_eq!(step.alternatives.len(), 2);
        assert_eq!(step.alternatives[0].name, "mysql");
        assert!(step.alternatives[0].probe.is_some());
        assert!(step.alternatives[1].probe.is_none());
        assert!(step.describe().contains("mysql, sqlite"));
    }

    #[test]
    fn install_without_template_errors() {
        let temp = TempDir::new().unwrap();
        let config = StepConfig {
            name: "framework".to_string(),
            install: Some("acme/skeleton".to_string()),
            ..Default::default()
        };

        let result = ResolvedStep::from_config(&config, &settings(), temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn install_describe_shows_substituted_command() {
        let temp = TempDir::new().unwrap();
        let mut s = settings();
        s.installer = Some("composer create-project {target} .".to_string());
        let config = StepConfig {
            name: "framework".to_string(),
            install: Some("acme/skeleton".to_string()),
            ..Default::default()
        };

        let step = ResolvedStep::from_config(&config, &s, temp.path()).unwrap();
        assert_eq!(step.describe(), "composer create-project acme/skeleton .");
    }

    #[test]
    fn step_env_overrides_global_env() {
        let mut global = HashMap::new();
        global.insert("A".to_string(), "global".to_string());
        global.insert("B".to_string(), "global".to_string());

        let mut step = HashMap::new();
        step.insert("A".to_string(), "step".to_string());

        let merged = merge_env(&global, &step);
        assert_eq!(merged["A"], "step");
        assert_eq!(merged["B"], "global");
    }

    #[test]
    fn resolve_all_preserves_order() {
        let temp = TempDir::new().unwrap();
        let configs = vec![run_step("b", "echo b"), run_step("a", "echo a")];

        let steps = ResolvedStep::resolve_all(&configs, &settings(), temp.path()).unwrap();
        let names: Vec<_> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
