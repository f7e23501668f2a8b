//! Debounced push of the learner profile to the remote backend.
//!
//! Every progress mutation calls [`RemoteSync::schedule`]; only the write
//! scheduled last within the debounce window actually reaches the backend.
//! Failures are logged and dropped: local state is the source of truth and
//! the next mutation will carry the latest values anyway.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use mentor_core::model::UserProgress;
use storage::{ProfileRecord, ProfileRepository};

const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct RemoteSync {
    repository: Arc<dyn ProfileRepository>,
    delay: Duration,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl RemoteSync {
    #[must_use]
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self::with_delay(repository, DEFAULT_DEBOUNCE)
    }

    #[must_use]
    pub fn with_delay(repository: Arc<dyn ProfileRepository>, delay: Duration) -> Self {
        Self {
            repository,
            delay,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn repository(&self) -> &Arc<dyn ProfileRepository> {
        &self.repository
    }

    /// Schedule an upsert of the current progress, replacing any write still
    /// waiting out the debounce window. Guest sessions (no email) are skipped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, progress: &UserProgress) {
        if !progress.has_identity() {
            debug!("skipping remote sync for guest session");
            return;
        }
        let record = ProfileRecord::from_progress(progress);
        let repository = Arc::clone(&self.repository);
        let delay = self.delay;

        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = repository.upsert_profile(&record).await {
                warn!(email = %record.email, error = %err, "profile sync failed");
            }
        }));
    }

    /// Wait for the pending write to finish. Intended for tests and shutdown.
    pub async fn settle(&self) {
        let handle = {
            let mut pending = match self.pending.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            pending.take()
        };
        if let Some(handle) = handle {
            // An aborted task resolving to Err is fine here.
            let _ = handle.await;
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::model::UserProgress;
    use storage::InMemoryProfileRepository;

    fn progress(email: &str, xp: u64) -> UserProgress {
        UserProgress::new("서연", email, 2).apply_xp_gain(xp, false)
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_schedules_coalesce_into_one_write() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let sync = RemoteSync::with_delay(repo.clone(), Duration::from_millis(800));

        sync.schedule(&progress("a@x", 100));
        sync.schedule(&progress("a@x", 200));
        sync.schedule(&progress("a@x", 300));
        sync.settle().await;

        assert_eq!(repo.upsert_count(), 1);
        let row = repo.find_by_email("a@x").await.unwrap().unwrap();
        assert_eq!(row.xp, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn guest_progress_is_never_synced() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let sync = RemoteSync::with_delay(repo.clone(), Duration::from_millis(10));

        sync.schedule(&progress("", 100));
        sync.settle().await;

        assert_eq!(repo.upsert_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_windows_each_write() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let sync = RemoteSync::with_delay(repo.clone(), Duration::from_millis(50));

        sync.schedule(&progress("a@x", 100));
        sync.settle().await;
        sync.schedule(&progress("a@x", 200));
        sync.settle().await;

        assert_eq!(repo.upsert_count(), 2);
    }
}
