//! Live ranking over the backend `profiles` table.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use storage::{ProfileRepository, StorageError};

const RANKING_LIMIT: usize = 50;

/// One leaderboard row, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranker {
    pub nickname: String,
    pub xp: u64,
    pub level: String,
    pub is_me: bool,
}

#[derive(Clone)]
pub struct LeaderboardService {
    repository: Arc<dyn ProfileRepository>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// Fetch the top rankings, marking the caller's own row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError`; a `MissingTable` tells the caller to render
    /// the backend setup instructions.
    pub async fn rankings(&self, me: Option<&str>) -> Result<Vec<Ranker>, StorageError> {
        let rows = self.repository.top_by_xp(RANKING_LIMIT).await?;
        Ok(rows
            .into_iter()
            .map(|row| Ranker {
                is_me: me == Some(row.email.as_str()),
                nickname: row.nickname,
                xp: row.xp,
                level: row.level,
            })
            .collect())
    }

    /// Follow change notifications, re-fetching the full ranking on every
    /// event and handing each result to `on_update`. Returns when the
    /// notification channel closes. No incremental merging; a refetch is
    /// cheap at this table size.
    pub async fn run_live<F>(&self, me: Option<String>, mut on_update: F)
    where
        F: FnMut(Result<Vec<Ranker>, StorageError>),
    {
        let mut changes = self.repository.watch();
        loop {
            match changes.recv().await {
                Ok(change) => {
                    debug!(email = %change.email, "profile changed, refreshing rankings");
                    on_update(self.rankings(me.as_deref()).await);
                }
                // Missed notifications still mean the table changed.
                Err(RecvError::Lagged(_)) => {
                    on_update(self.rankings(me.as_deref()).await);
                }
                Err(RecvError::Closed) => return,
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::model::Level;
    use storage::{InMemoryProfileRepository, ProfileRecord};

    fn record(email: &str, nickname: &str, xp: u64) -> ProfileRecord {
        ProfileRecord {
            email: email.to_string(),
            nickname: nickname.to_string(),
            xp,
            level: Level::from_xp(xp).as_label().to_string(),
            progress: 0,
            completed_missions: 0,
        }
    }

    #[tokio::test]
    async fn rankings_mark_the_callers_row() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        repo.upsert_profile(&record("a@x", "A", 900)).await.unwrap();
        repo.upsert_profile(&record("b@x", "B", 400)).await.unwrap();

        let service = LeaderboardService::new(repo);
        let rankings = service.rankings(Some("b@x")).await.unwrap();

        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[0].nickname, "A");
        assert!(!rankings[0].is_me);
        assert!(rankings[1].is_me);
        assert_eq!(rankings[0].level, "Lv.2 주니어 분석가");
    }

    #[tokio::test]
    async fn guest_views_mark_no_row() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        repo.upsert_profile(&record("a@x", "A", 900)).await.unwrap();

        let service = LeaderboardService::new(repo);
        let rankings = service.rankings(None).await.unwrap();
        assert!(rankings.iter().all(|r| !r.is_me));
    }

    #[tokio::test]
    async fn live_loop_refetches_on_every_change() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let service = LeaderboardService::new(repo.clone());

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let live = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .run_live(Some("a@x".to_string()), move |update| {
                        let _ = tx.send(update);
                    })
                    .await;
            })
        };

        // let the live task subscribe before the first write
        tokio::task::yield_now().await;

        repo.upsert_profile(&record("a@x", "A", 100)).await.unwrap();
        let first = rx.recv().await.unwrap().unwrap();
        assert_eq!(first.len(), 1);
        assert!(first[0].is_me);

        repo.upsert_profile(&record("b@x", "B", 500)).await.unwrap();
        let second = rx.recv().await.unwrap().unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].nickname, "B");

        live.abort();
    }
}
