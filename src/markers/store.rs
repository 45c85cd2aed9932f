//! Completion marker persistence.
//!
//! A marker records "this step finished successfully" and survives across
//! invocations, which is what makes interrupted runs resume instead of
//! restart. The [`MarkerStore`] trait decouples the sequencer from the
//! backing storage: [`FileMarkerStore`] is the durable default,
//! [`MemoryMarkerStore`] backs tests.
//!
//! Concurrent runs against the same store are not supported; this models a
//! single-operator setup flow and takes no locks.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{GroundworkError, Result};

/// A completed step as recorded by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedMarker {
    /// Step name the marker belongs to.
    pub step: String,

    /// When the step completed, if the backing store records it.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Persistence contract for step completion markers.
///
/// All operations are fallible: a store that cannot be read or written must
/// surface the error rather than let the run proceed on wrong assumptions.
pub trait MarkerStore {
    /// True iff a marker for `step` exists.
    fn is_complete(&self, step: &str) -> Result<bool>;

    /// Record that `step` completed. Idempotent; calling twice is safe.
    fn mark_complete(&mut self, step: &str) -> Result<()>;

    /// Remove the marker for `step` (no-op if absent).
    fn reset(&mut self, step: &str) -> Result<()>;

    /// Remove every marker.
    fn reset_all(&mut self) -> Result<()>;

    /// List completed steps, sorted by step name.
    fn completed(&self) -> Result<Vec<CompletedMarker>>;
}

/// File-per-step marker store under `<project>/.groundwork/markers/`.
///
/// Each marker is a file named after the step whose content is the UTC
/// completion timestamp. Writes go through the write-to-temp-then-rename
/// pattern so a crash never leaves a half-written marker.
#[derive(Debug)]
pub struct FileMarkerStore {
    dir: PathBuf,
}

impl FileMarkerStore {
    /// Marker directory relative to the project root.
    pub const MARKER_DIR: &'static str = ".groundwork/markers";

    /// Create a store for the given project root. No I/O happens until
    /// the first write.
    pub fn new(project_root: &Path) -> Self {
        Self {
            dir: project_root.join(Self::MARKER_DIR),
        }
    }

    /// The directory markers live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn marker_path(&self, step: &str) -> PathBuf {
        self.dir.join(step)
    }

    fn store_err(&self, source: io::Error) -> GroundworkError {
        GroundworkError::MarkerStore {
            path: self.dir.clone(),
            source,
        }
    }
}

impl MarkerStore for FileMarkerStore {
    fn is_complete(&self, step: &str) -> Result<bool> {
        match fs::metadata(self.marker_path(step)) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.store_err(e)),
        }
    }

    fn mark_complete(&mut self, step: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| self.store_err(e))?;

        let path = self.marker_path(step);
        let tmp = self.dir.join(format!("{step}.tmp"));
        let stamp = Utc::now().to_rfc3339();

        fs::write(&tmp, stamp).map_err(|e| self.store_err(e))?;
        fs::rename(&tmp, &path).map_err(|e| self.store_err(e))?;

        Ok(())
    }

    fn reset(&mut self, step: &str) -> Result<()> {
        match fs::remove_file(self.marker_path(step)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.store_err(e)),
        }
    }

    fn reset_all(&mut self) -> Result<()> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(self.store_err(e)),
        };

        for entry in entries {
            let entry = entry.map_err(|e| self.store_err(e))?;
            fs::remove_file(entry.path()).map_err(|e| self.store_err(e))?;
        }

        Ok(())
    }

    fn completed(&self) -> Result<Vec<CompletedMarker>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.store_err(e)),
        };

        let mut markers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.store_err(e))?;
            let step = entry.file_name().to_string_lossy().to_string();
            if step.ends_with(".tmp") {
                continue;
            }

            // Timestamp is informational; an unreadable one is not an error
            let completed_at = fs::read_to_string(entry.path())
                .ok()
                .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
                .map(|dt| dt.with_timezone(&Utc));

            markers.push(CompletedMarker { step, completed_at });
        }

        markers.sort_by(|a, b| a.step.cmp(&b.step));
        Ok(markers)
    }
}

/// In-memory marker store for tests.
///
/// `fail_writes` makes `mark_complete` return a storage error, exercising
/// the sequencer's marker-failure-is-fatal path.
#[derive(Debug, Default)]
pub struct MemoryMarkerStore {
    markers: BTreeMap<String, DateTime<Utc>>,
    fail_writes: bool,
}

impl MemoryMarkerStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `mark_complete` calls fail.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl MarkerStore for MemoryMarkerStore {
    fn is_complete(&self, step: &str) -> Result<bool> {
        Ok(self.markers.contains_key(step))
    }

    fn mark_complete(&mut self, step: &str) -> Result<()> {
        if self.fail_writes {
            return Err(GroundworkError::MarkerStore {
                path: PathBuf::from("<memory>"),
                source: io::Error::new(io::ErrorKind::Other, "simulated write failure"),
            });
        }
        self.markers.insert(step.to_string(), Utc::now());
        Ok(())
    }

    fn reset(&mut self, step: &str) -> Result<()> {
        self.markers.remove(step);
        Ok(())
    }

    fn reset_all(&mut self) -> Result<()> {
        self.markers.clear();
        Ok(())
    }

    fn completed(&self) -> Result<Vec<CompletedMarker>> {
        Ok(self
            .markers
            .iter()
            .map(|(step, at)| CompletedMarker {
                step: step.clone(),
                completed_at: Some(*at),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_roundtrip() {
        let temp = TempDir::new().unwrap();
        let mut store = FileMarkerStore::new(temp.path());

        assert!(!store.is_complete("install").unwrap());

        store.mark_complete("install").unwrap();
        assert!(store.is_complete("install").unwrap());

        store.reset("install").unwrap();
        assert!(!store.is_complete("install").unwrap());
    }

    #[test]
    fn file_store_mark_complete_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let mut store = FileMarkerStore::new(temp.path());

        store.mark_complete("install").unwrap();
        store.mark_complete("install").unwrap();

        assert!(store.is_complete("install").unwrap());
        assert_eq!(store.completed().unwrap().len(), 1);
    }

    #[test]
    fn file_store_reset_absent_marker_is_noop() {
        let temp = TempDir::new().unwrap();
        let mut store = FileMarkerStore::new(temp.path());
        assert!(store.reset("never_ran").is_ok());
    }

    #[test]
    fn file_store_reset_all_clears_everything() {
        let temp = TempDir::new().unwrap();
        let mut store = FileMarkerStore::new(temp.path());

        store.mark_complete("a").unwrap();
        store.mark_complete("b").unwrap();
        store.reset_all().unwrap();

        assert!(store.completed().unwrap().is_empty());
        assert!(!store.is_complete("a").unwrap());
    }

    #[test]
    fn file_store_reset_all_without_dir_is_noop() {
        let temp = TempDir::new().unwrap();
        let mut store = FileMarkerStore::new(temp.path());
        assert!(store.reset_all().is_ok());
    }

    #[test]
    fn file_store_records_timestamp() {
        let temp = TempDir::new().unwrap();
        let mut store = FileMarkerStore::new(temp.path());

        store.mark_complete("install").unwrap();

        let markers = store.completed().unwrap();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].step, "install");
        assert!(markers[0].completed_at.is_some());
    }

    #[test]
    fn file_store_completed_sorted_by_name() {
        let temp = TempDir::new().unwrap();
        let mut store = FileMarkerStore::new(temp.path());

        store.mark_complete("zulu").unwrap();
        store.mark_complete("alpha").unwrap();

        let names: Vec<_> = store
            .completed()
            .unwrap()
            .into_iter()
            .map(|m| m.step)
            .collect();
        assert_eq!(names, vec!["alpha", "zulu"]);
    }

    #[test]
    fn file_store_tolerates_garbage_timestamp() {
        let temp = TempDir::new().unwrap();
        let mut store = FileMarkerStore::new(temp.path());

        store.mark_complete("install").unwrap();
        std::fs::write(store.dir().join("install"), "not a timestamp").unwrap();

        let markers = store.completed().unwrap();
        assert_eq!(markers[0].step, "install");
        assert!(markers[0].completed_at.is_none());
        assert!(store.is_complete("install").unwrap());
    }

    #[test]
    fn file_store_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let mut store = FileMarkerStore::new(temp.path());

        store.mark_complete("install").unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(store.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryMarkerStore::new();

        store.mark_complete("a").unwrap();
        assert!(store.is_complete("a").unwrap());

        store.reset_all().unwrap();
        assert!(!store.is_complete("a").unwrap());
    }

    #[test]
    fn memory_store_fail_writes() {
        let mut store = MemoryMarkerStore::new();
        store.set_fail_writes(true);

        let result = store.mark_complete("a");
        assert!(matches!(result, Err(GroundworkError::MarkerStore { .. })));
        assert!(!store.is_complete("a").unwrap());
    }
}
