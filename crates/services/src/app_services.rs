use std::path::Path;
use std::sync::Arc;

use mentor_core::Clock;
use mentor_core::model::Catalog;
use storage::{JsonSnapshotStore, ProfileRepository, RestProfileRepository, SnapshotStore};

use crate::leaderboard::LeaderboardService;
use crate::mentor::MentorService;
use crate::progress_service::ProgressService;
use crate::sessions::LessonWorkflow;
use crate::sync::RemoteSync;

/// Assembles the app-facing services around shared storage.
pub struct AppServices {
    mentor: Arc<MentorService>,
    leaderboard: Arc<LeaderboardService>,
    progress: ProgressService,
    workflow: LessonWorkflow,
}

impl AppServices {
    /// Build services against the hosted backend, with the snapshot stored
    /// under `data_dir` and all generative config read from the environment.
    #[must_use]
    pub fn from_env(data_dir: impl AsRef<Path>) -> Self {
        let repository: Arc<dyn ProfileRepository> = Arc::new(RestProfileRepository::from_env());
        let snapshots: Arc<dyn SnapshotStore> = Arc::new(JsonSnapshotStore::in_dir(data_dir));
        Self::new(
            Catalog::builtin(),
            Clock::default(),
            repository,
            snapshots,
            MentorService::from_env(),
        )
    }

    #[must_use]
    pub fn new(
        catalog: Catalog,
        clock: Clock,
        repository: Arc<dyn ProfileRepository>,
        snapshots: Arc<dyn SnapshotStore>,
        mentor: MentorService,
    ) -> Self {
        let sync = RemoteSync::new(Arc::clone(&repository));
        let leaderboard = Arc::new(LeaderboardService::new(repository));
        let progress = ProgressService::new(catalog, clock, snapshots, sync);
        Self {
            mentor: Arc::new(mentor),
            leaderboard,
            progress,
            workflow: LessonWorkflow::new(),
        }
    }

    #[must_use]
    pub fn mentor(&self) -> Arc<MentorService> {
        Arc::clone(&self.mentor)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressService {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressService {
        &mut self.progress
    }

    #[must_use]
    pub fn workflow(&self) -> &LessonWorkflow {
        &self.workflow
    }

    pub fn workflow_mut(&mut self) -> &mut LessonWorkflow {
        &mut self.workflow
    }
}
