use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::broadcast;

use mentor_core::model::{ProgressError, UserProgress};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("profile not found")]
    NotFound,

    #[error("profiles table does not exist; run the setup SQL against the backend")]
    MissingTable,

    #[error("backend rejected the request ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    InvalidRecord(#[from] ProgressError),
}

//
// ─── PROFILE RECORD ────────────────────────────────────────────────────────────
//

/// Flat row stored in the backend `profiles` table.
///
/// Field names are wire-exact: the hosted store already holds rows with
/// these columns, and `email` is the upsert conflict key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub email: String,
    pub nickname: String,
    pub xp: u64,
    pub level: String,
    pub progress: u32,
    pub completed_missions: u32,
}

impl ProfileRecord {
    #[must_use]
    pub fn from_progress(progress: &UserProgress) -> Self {
        Self {
            email: progress.email.clone(),
            nickname: progress.nickname.clone(),
            xp: progress.xp,
            level: progress.level.as_label().to_string(),
            progress: u32::from(progress.progress_percent),
            completed_missions: progress.completed_missions,
        }
    }

    /// Rebuild the domain aggregate against the current catalog size.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if the stored counts are
    /// impossible for the given catalog.
    pub fn into_progress(self, total_missions: u32) -> Result<UserProgress, StorageError> {
        Ok(UserProgress::from_persisted(
            self.nickname,
            self.email,
            self.xp,
            &self.level,
            self.completed_missions,
            total_missions,
        )?)
    }
}

/// Change notification emitted when a profile row is written.
#[derive(Debug, Clone)]
pub struct ProfileChange {
    pub email: String,
}

//
// ─── REPOSITORY CONTRACT ───────────────────────────────────────────────────────
//

/// Remote profile store: upsert keyed by email (last write wins), lookups,
/// and the ranking query behind the leaderboard.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert or update the row whose `email` matches.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StorageError>;

    /// Fetch the row for `email`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure; a missing row is `Ok(None)`.
    async fn find_by_email(&self, email: &str) -> Result<Option<ProfileRecord>, StorageError>;

    /// Top `limit` rows ordered by XP descending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn top_by_xp(&self, limit: usize) -> Result<Vec<ProfileRecord>, StorageError>;

    /// Subscribe to change notifications for the profiles table.
    fn watch(&self) -> broadcast::Receiver<ProfileChange>;
}

//
// ─── IN-MEMORY IMPLEMENTATION ──────────────────────────────────────────────────
//

/// In-memory repository for tests and prototyping. Fires a change
/// notification on every upsert, like the realtime channel would.
#[derive(Clone)]
pub struct InMemoryProfileRepository {
    rows: Arc<Mutex<HashMap<String, ProfileRecord>>>,
    changes: broadcast::Sender<ProfileChange>,
    upserts: Arc<AtomicUsize>,
}

impl InMemoryProfileRepository {
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            rows: Arc::new(Mutex::new(HashMap::new())),
            changes,
            upserts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of upserts observed; used to assert debounce coalescing.
    #[must_use]
    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StorageError> {
        {
            let mut rows = self
                .rows
                .lock()
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            rows.insert(record.email.clone(), record.clone());
        }
        self.upserts.fetch_add(1, Ordering::SeqCst);
        // Nobody listening is fine.
        let _ = self.changes.send(ProfileChange {
            email: record.email.clone(),
        });
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ProfileRecord>, StorageError> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(rows.get(email).cloned())
    }

    async fn top_by_xp(&self, limit: usize) -> Result<Vec<ProfileRecord>, StorageError> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut all: Vec<ProfileRecord> = rows.values().cloned().collect();
        all.sort_by(|a, b| b.xp.cmp(&a.xp).then_with(|| a.nickname.cmp(&b.nickname)));
        all.truncate(limit);
        Ok(all)
    }

    fn watch(&self) -> broadcast::Receiver<ProfileChange> {
        self.changes.subscribe()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
