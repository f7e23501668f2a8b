//! Local snapshot of learner state, read at startup to pre-populate the UI
//! before remote hydration completes and written on every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mentor_core::model::{LessonId, MissionId, UserProgress};

use crate::repository::StorageError;

/// Fixed storage key, kept for compatibility with snapshots written by the
/// original client.
pub const SNAPSHOT_KEY: &str = "tq_user_stats";

/// Everything needed to restore a session offline: the aggregate plus the
/// completion sets that drive lock state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub saved_at: DateTime<Utc>,
    pub progress: UserProgress,
    pub completed_missions: Vec<MissionId>,
    pub completed_lessons: Vec<LessonId>,
}

/// Local persistence boundary. Synchronous on purpose: writes are a few
/// hundred bytes on the event loop's mutation path.
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store is unreadable or corrupt.
    fn load(&self) -> Result<Option<Snapshot>, StorageError>;

    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;
}

//
// ─── JSON FILE STORE ───────────────────────────────────────────────────────────
//

/// Snapshot stored as pretty-printed JSON in a single file.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional location inside an app data directory:
    /// `<dir>/tq_user_stats.json`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{SNAPSHOT_KEY}.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let snapshot =
            serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

//
// ─── IN-MEMORY STORE ───────────────────────────────────────────────────────────
//

/// Test double keeping the snapshot in a mutex slot.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    slot: Mutex<Option<Snapshot>>,
}

impl InMemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        *slot = Some(snapshot.clone());
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::time::fixed_now;

    fn sample() -> Snapshot {
        Snapshot {
            saved_at: fixed_now(),
            progress: UserProgress::new("서연", "seoyeon@x", 2).apply_xp_gain(800, true),
            completed_missions: vec![MissionId::from("1-1")],
            completed_lessons: vec![LessonId::from("1-1-1"), LessonId::from("1-1-2")],
        }
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::in_dir(dir.path());
        assert!(store.load().unwrap().is_none());

        let snapshot = sample();
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
        assert!(store.path().ends_with("tq_user_stats.json"));
    }

    #[test]
    fn file_store_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::in_dir(dir.path().join("nested/app-data"));
        store.save(&sample()).unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn corrupt_snapshot_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::in_dir(dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(
            store.load(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn in_memory_store_replaces_previous_snapshot() {
        let store = InMemorySnapshotStore::new();
        let first = sample();
        store.save(&first).unwrap();

        let mut second = sample();
        second.progress = second.progress.apply_xp_gain(1000, true);
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), Some(second));
    }
}
