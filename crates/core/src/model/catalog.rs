use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::{LessonId, MissionId, Quiz};

//
// ─── CURRICULUM UNITS ──────────────────────────────────────────────────────────
//

/// Sub-unit of a mission: intro dialogue, reference guidebook, optional quiz.
/// Statically defined, never created or destroyed at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    pub xp_reward: u32,
    pub quiz: Option<Quiz>,
    pub guidebook_url: Option<String>,
}

/// Top-level curriculum unit containing ordered lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub chapter: String,
    pub title: String,
    pub description: String,
    pub xp_reward: u32,
    pub kind: String,
    pub lessons: Vec<Lesson>,
}

impl Mission {
    /// Lesson at `index` is locked unless its predecessor is completed.
    /// The first lesson is always open.
    #[must_use]
    pub fn lesson_locked(&self, index: usize, completed: &HashSet<LessonId>) -> bool {
        if index == 0 {
            return false;
        }
        match self.lessons.get(index - 1) {
            Some(previous) => !completed.contains(&previous.id),
            None => true,
        }
    }

    /// Whether every lesson of this mission has been completed.
    #[must_use]
    pub fn all_lessons_completed(&self, completed: &HashSet<LessonId>) -> bool {
        self.lessons.iter().all(|l| completed.contains(&l.id))
    }

    #[must_use]
    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| &l.id == id)
    }
}

/// A curriculum unit with an explicit discriminant, for code paths that
/// present either shape (e.g. guidebook headers). Replaces the old habit of
/// structurally repurposing a mission as a pseudo-lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearningUnit<'a> {
    Mission(&'a Mission),
    Lesson {
        mission: &'a Mission,
        lesson: &'a Lesson,
    },
}

impl LearningUnit<'_> {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            LearningUnit::Mission(m) => &m.title,
            LearningUnit::Lesson { lesson, .. } => &lesson.title,
        }
    }

    #[must_use]
    pub fn xp_reward(&self) -> u32 {
        match self {
            LearningUnit::Mission(m) => m.xp_reward,
            LearningUnit::Lesson { lesson, .. } => lesson.xp_reward,
        }
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The ordered mission catalog plus the locking rules over it.
///
/// Missions unlock strictly in catalog order: an index-based gate over the
/// completed-mission count, not a dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    missions: Vec<Mission>,
}

impl Catalog {
    #[must_use]
    pub fn new(missions: Vec<Mission>) -> Self {
        Self { missions }
    }

    /// The built-in curriculum shipped with the client.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(crate::builtin::missions())
    }

    #[must_use]
    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    #[must_use]
    pub fn total_missions(&self) -> u32 {
        u32::try_from(self.missions.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn mission(&self, id: &MissionId) -> Option<&Mission> {
        self.missions.iter().find(|m| &m.id == id)
    }

    /// Locate a lesson anywhere in the catalog.
    #[must_use]
    pub fn find_lesson(&self, id: &LessonId) -> Option<(&Mission, &Lesson)> {
        self.missions
            .iter()
            .find_map(|m| m.lesson(id).map(|l| (m, l)))
    }

    /// Mission at ordinal `index` is locked unless enough missions are done,
    /// regardless of which specific missions they were.
    #[must_use]
    pub fn mission_locked(index: usize, completed_missions: u32) -> bool {
        index > completed_missions as usize
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
