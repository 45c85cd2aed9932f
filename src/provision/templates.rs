//! Generated-file emission collaborator.
//!
//! Writes take the full desired content rather than patching text in place,
//! which makes them idempotent by construction: re-running a write step
//! converges on the same file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::provision::ActionOutput;

/// Writes generated files (models, controllers, migrations, env files).
pub trait TemplateWriter {
    /// Write `content` to `path`, creating parent directories as needed.
    fn write_file(&self, path: &Path, content: &str) -> Result<ActionOutput>;
}

/// Filesystem-backed writer rooted at the project directory.
#[derive(Debug, Clone)]
pub struct FsTemplateWriter {
    root: PathBuf,
}

impl FsTemplateWriter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl TemplateWriter for FsTemplateWriter {
    fn write_file(&self, path: &Path, content: &str) -> Result<ActionOutput> {
        let full = self.resolve(path);

        if let Some(parent) = full.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return Ok(ActionOutput::failed(format!(
                    "cannot create {}: {}",
                    parent.display(),
                    e
                )));
            }
        }

        match fs::write(&full, content) {
            Ok(()) => Ok(ActionOutput::ok()),
            Err(e) => Ok(ActionOutput::failed(format!(
                "cannot write {}: {}",
                full.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_file_with_content() {
        let temp = TempDir::new().unwrap();
        let writer = FsTemplateWriter::new(temp.path().to_path_buf());

        let output = writer
            .write_file(Path::new(".env"), "APP_ENV=local\n")
            .unwrap();
        assert!(output.success);

        let content = std::fs::read_to_string(temp.path().join(".env")).unwrap();
        assert_eq!(content, "APP_ENV=local\n");
    }

    #[test]
    fn creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let writer = FsTemplateWriter::new(temp.path().to_path_buf());

        let output = writer
            .write_file(Path::new("app/Models/Task.php"), "<?php\n")
            .unwrap();
        assert!(output.success);
        assert!(temp.path().join("app/Models/Task.php").exists());
    }

    #[test]
    fn rewrite_converges_on_same_content() {
        let temp = TempDir::new().unwrap();
        let writer = FsTemplateWriter::new(temp.path().to_path_buf());

        writer.write_file(Path::new("routes.php"), "v2\n").unwrap();
        writer.write_file(Path::new("routes.php"), "v2\n").unwrap();

        let content = std::fs::read_to_string(temp.path().join("routes.php")).unwrap();
        assert_eq!(content, "v2\n");
    }

    #[test]
    fn unwritable_path_reports_failure() {
        let temp = TempDir::new().unwrap();
        // A file where a directory is needed
        std::fs::write(temp.path().join("blocked"), "").unwrap();
        let writer = FsTemplateWriter::new(temp.path().to_path_buf());

        let output = writer
            .write_file(Path::new("blocked/child.txt"), "content")
            .unwrap();
        assert!(!output.success);
        assert!(output.detail.is_some());
    }
}
