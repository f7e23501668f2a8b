use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("completed missions ({completed}) exceeds total missions ({total})")]
    TooManyCompleted { completed: u32, total: u32 },
}

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

/// Learner rank, derived from accumulated XP. Never set directly.
///
/// The display label doubles as the value stored in the backend `level`
/// column, so it must stay byte-identical across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Intern,
    Junior,
    Analyst,
    Senior,
    Engineer,
}

impl Level {
    /// Derive the level from XP using the threshold table, highest first.
    #[must_use]
    pub fn from_xp(xp: u64) -> Self {
        if xp >= 3000 {
            Level::Engineer
        } else if xp >= 2000 {
            Level::Senior
        } else if xp >= 1000 {
            Level::Analyst
        } else if xp >= 300 {
            Level::Junior
        } else {
            Level::Intern
        }
    }

    /// Backend-visible display label.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Level::Intern => "Lv.1 인턴",
            Level::Junior => "Lv.2 주니어 분석가",
            Level::Analyst => "Lv.3 분석가",
            Level::Senior => "Lv.4 시니어 분석가",
            Level::Engineer => "Lv.5 BI 엔지니어",
        }
    }

    /// Parse a stored label back into a level. Unknown labels yield `None`;
    /// callers should fall back to deriving from XP.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Lv.1 인턴" => Some(Level::Intern),
            "Lv.2 주니어 분석가" => Some(Level::Junior),
            "Lv.3 분석가" => Some(Level::Analyst),
            "Lv.4 시니어 분석가" => Some(Level::Senior),
            "Lv.5 BI 엔지니어" => Some(Level::Engineer),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

//
// ─── PROGRESS PERCENT ──────────────────────────────────────────────────────────
//

/// Percentage of the catalog completed, floored and clamped to `0..=100`.
///
/// A zero-mission catalog reports 0% rather than dividing by zero.
#[must_use]
pub fn progress_percent(completed_missions: u32, total_missions: u32) -> u8 {
    if total_missions == 0 {
        return 0;
    }
    let pct = (u64::from(completed_missions) * 100) / u64::from(total_missions);
    u8::try_from(pct.min(100)).unwrap_or(100)
}

//
// ─── USER PROGRESS ─────────────────────────────────────────────────────────────
//

/// Per-learner aggregate. `level` and `progress_percent` are always derived;
/// the only mutation path is [`UserProgress::apply_xp_gain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub nickname: String,
    pub email: String,
    pub xp: u64,
    pub level: Level,
    pub completed_missions: u32,
    pub total_missions: u32,
    pub progress_percent: u8,
}

impl UserProgress {
    /// Fresh record for a first login, all counters zeroed.
    #[must_use]
    pub fn new(nickname: impl Into<String>, email: impl Into<String>, total_missions: u32) -> Self {
        Self {
            nickname: nickname.into(),
            email: email.into(),
            xp: 0,
            level: Level::Intern,
            completed_missions: 0,
            total_missions,
            progress_percent: 0,
        }
    }

    /// Rehydrate from a persisted record, re-deriving level and percent so
    /// the invariants hold even if the stored copy drifted.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::TooManyCompleted` if the completed count
    /// exceeds the catalog size.
    pub fn from_persisted(
        nickname: impl Into<String>,
        email: impl Into<String>,
        xp: u64,
        level_label: &str,
        completed_missions: u32,
        total_missions: u32,
    ) -> Result<Self, ProgressError> {
        if completed_missions > total_missions {
            return Err(ProgressError::TooManyCompleted {
                completed: completed_missions,
                total: total_missions,
            });
        }
        let level = Level::from_label(level_label).unwrap_or_else(|| Level::from_xp(xp));
        Ok(Self {
            nickname: nickname.into(),
            email: email.into(),
            xp,
            level,
            completed_missions,
            total_missions,
            progress_percent: progress_percent(completed_missions, total_missions),
        })
    }

    /// Apply an XP gain, returning the updated aggregate.
    ///
    /// Pure: level and percent are re-derived, XP saturates instead of
    /// wrapping, and the caller is responsible for the `mission_newly_completed`
    /// idempotence guard (checking the completed-id set first).
    #[must_use]
    pub fn apply_xp_gain(&self, xp_delta: u64, mission_newly_completed: bool) -> Self {
        let xp = self.xp.saturating_add(xp_delta);
        let completed_missions = if mission_newly_completed {
            (self.completed_missions + 1).min(self.total_missions)
        } else {
            self.completed_missions
        };
        Self {
            nickname: self.nickname.clone(),
            email: self.email.clone(),
            xp,
            level: Level::from_xp(xp),
            completed_missions,
            total_missions: self.total_missions,
            progress_percent: progress_percent(completed_missions, self.total_missions),
        }
    }

    /// Whether the learner has a durable cross-device identity.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
