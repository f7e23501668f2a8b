//! Owns the learner's progress aggregate and completion sets. Every XP or
//! completion change flows through here; each mutation writes the local
//! snapshot and schedules a debounced remote sync.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use mentor_core::Clock;
use mentor_core::model::{Catalog, LessonId, Mission, MissionId, UserProgress};
use storage::{Snapshot, SnapshotStore};

use crate::error::ProgressServiceError;
use crate::sync::RemoteSync;

pub struct ProgressService {
    catalog: Catalog,
    clock: Clock,
    snapshots: Arc<dyn SnapshotStore>,
    sync: RemoteSync,
    progress: UserProgress,
    completed_lessons: HashSet<LessonId>,
    completed_missions: HashSet<MissionId>,
}

impl ProgressService {
    /// Build the service, restoring state from the local snapshot when one
    /// exists. A missing or unreadable snapshot starts a guest session.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        clock: Clock,
        snapshots: Arc<dyn SnapshotStore>,
        sync: RemoteSync,
    ) -> Self {
        let total = catalog.total_missions();
        let (progress, completed_lessons, completed_missions) = match snapshots.load() {
            Ok(Some(snapshot)) => restore(snapshot, total),
            Ok(None) => fresh(total),
            Err(err) => {
                warn!(error = %err, "local snapshot unreadable, starting fresh");
                fresh(total)
            }
        };
        Self {
            catalog,
            clock,
            snapshots,
            sync,
            progress,
            completed_lessons,
            completed_missions,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    #[must_use]
    pub fn lesson_completed(&self, lesson_id: &LessonId) -> bool {
        self.completed_lessons.contains(lesson_id)
    }

    #[must_use]
    pub fn mission_completed(&self, mission_id: &MissionId) -> bool {
        self.completed_missions.contains(mission_id)
    }

    /// Whether the mission at catalog ordinal `index` is still locked.
    #[must_use]
    pub fn mission_locked(&self, index: usize) -> bool {
        Catalog::mission_locked(index, self.progress.completed_missions)
    }

    /// Whether lesson `index` of a mission is locked by its predecessor.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::UnknownMission` for ids not in the
    /// catalog.
    pub fn lesson_locked(
        &self,
        mission_id: &MissionId,
        index: usize,
    ) -> Result<bool, ProgressServiceError> {
        let mission = self.mission(mission_id)?;
        Ok(mission.lesson_locked(index, &self.completed_lessons))
    }

    /// Sign in, hydrating from the backend profile when one exists for the
    /// email. Infallible: a failed hydration logs and keeps local state.
    pub async fn login(&mut self, nickname: &str, email: &str) {
        let total = self.catalog.total_missions();
        let same_identity = self.progress.has_identity() && self.progress.email == email;
        if !same_identity {
            self.completed_lessons.clear();
            self.completed_missions.clear();
            self.progress = UserProgress::new(nickname, email, total);
        } else {
            self.progress.nickname = nickname.to_string();
        }

        if !email.trim().is_empty() {
            match self.sync.repository().find_by_email(email).await {
                Ok(Some(record)) => match record.into_progress(total) {
                    Ok(remote) => {
                        info!(%email, xp = remote.xp, "hydrated profile from backend");
                        self.progress = UserProgress {
                            nickname: nickname.to_string(),
                            ..remote
                        };
                    }
                    Err(err) => {
                        warn!(%email, error = %err, "backend profile invalid, keeping local state");
                    }
                },
                Ok(None) => {}
                Err(err) => {
                    warn!(%email, error = %err, "profile hydration failed, keeping local state");
                }
            }
        }
        self.persist();
    }

    /// Record a lesson as completed. Idempotent; returns whether the set
    /// actually changed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::UnknownLesson` for ids not in the
    /// catalog.
    pub fn complete_lesson(&mut self, lesson_id: &LessonId) -> Result<bool, ProgressServiceError> {
        if self.catalog.find_lesson(lesson_id).is_none() {
            return Err(ProgressServiceError::UnknownLesson(lesson_id.clone()));
        }
        let inserted = self.completed_lessons.insert(lesson_id.clone());
        if inserted {
            self.persist();
        }
        Ok(inserted)
    }

    /// Whether a mission has all lessons done but has not been reported yet.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::UnknownMission` for ids not in the
    /// catalog.
    pub fn mission_ready(&self, mission_id: &MissionId) -> Result<bool, ProgressServiceError> {
        let mission = self.mission(mission_id)?;
        Ok(mission.all_lessons_completed(&self.completed_lessons)
            && !self.completed_missions.contains(mission_id))
    }

    /// Report a mission as complete, applying its XP reward exactly once.
    /// Reporting an already-reported mission returns the unchanged progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::MissionIncomplete` while any lesson is
    /// unfinished.
    pub fn report_mission(
        &mut self,
        mission_id: &MissionId,
    ) -> Result<&UserProgress, ProgressServiceError> {
        let mission = self.mission(mission_id)?;
        if self.completed_missions.contains(mission_id) {
            return Ok(&self.progress);
        }
        if !mission.all_lessons_completed(&self.completed_lessons) {
            return Err(ProgressServiceError::MissionIncomplete(mission_id.clone()));
        }
        let reward = u64::from(mission.xp_reward);
        self.progress = self.progress.apply_xp_gain(reward, true);
        self.completed_missions.insert(mission_id.clone());
        self.persist();
        Ok(&self.progress)
    }

    fn mission(&self, mission_id: &MissionId) -> Result<&Mission, ProgressServiceError> {
        self.catalog
            .mission(mission_id)
            .ok_or_else(|| ProgressServiceError::UnknownMission(mission_id.clone()))
    }

    fn persist(&self) {
        let mut completed_missions: Vec<MissionId> =
            self.completed_missions.iter().cloned().collect();
        completed_missions.sort();
        let mut completed_lessons: Vec<LessonId> =
            self.completed_lessons.iter().cloned().collect();
        completed_lessons.sort();

        let snapshot = Snapshot {
            saved_at: self.clock.now(),
            progress: self.progress.clone(),
            completed_missions,
            completed_lessons,
        };
        if let Err(err) = self.snapshots.save(&snapshot) {
            warn!(error = %err, "failed to write local snapshot");
        }
        self.sync.schedule(&self.progress);
    }
}

fn fresh(total: u32) -> (UserProgress, HashSet<LessonId>, HashSet<MissionId>) {
    (
        UserProgress::new("게스트", "", total),
        HashSet::new(),
        HashSet::new(),
    )
}

fn restore(
    snapshot: Snapshot,
    total: u32,
) -> (UserProgress, HashSet<LessonId>, HashSet<MissionId>) {
    let progress = match UserProgress::from_persisted(
        snapshot.progress.nickname.clone(),
        snapshot.progress.email.clone(),
        snapshot.progress.xp,
        snapshot.progress.level.as_label(),
        snapshot.progress.completed_missions,
        total,
    ) {
        Ok(progress) => progress,
        Err(err) => {
            warn!(error = %err, "snapshot violates catalog invariants, starting fresh");
            return fresh(total);
        }
    };
    (
        progress,
        snapshot.completed_lessons.into_iter().collect(),
        snapshot.completed_missions.into_iter().collect(),
    )
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
