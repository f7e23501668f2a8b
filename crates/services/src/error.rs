//! Shared error types for the services crate.

use thiserror::Error;

use mentor_core::model::{LessonId, MissionId};

/// Errors emitted while acquiring mentor dialogue. Internal to
/// `MentorService`: callers of `dialogue`/`ask` only ever see the fallback
/// content these errors degrade into.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MentorError {
    #[error("mentor generation is not configured")]
    Disabled,
    #[error("mentor generation returned an empty dialogue list")]
    EmptyScript,
    #[error("mentor generation returned no text")]
    EmptyResponse,
    #[error("mentor generation failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("mentor generation returned malformed JSON: {0}")]
    Malformed(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by the lesson session state machine. All of these are
/// sequencing violations; quiz misses are ordinary feedback values, not
/// errors.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("review choice has not been made yet")]
    AwaitingReviewChoice,
    #[error("not awaiting a review choice")]
    NotAwaitingReviewChoice,
    #[error("dialogue script has not arrived yet")]
    DialoguePending,
    #[error("a dialogue script is already attached")]
    ScriptAlreadyAttached,
    #[error("session is not in the intro dialogue phase")]
    NotInDialogue,
    #[error("session is not in the guidebook phase")]
    NotInGuidebook,
    #[error("session is not in the expected quiz stage")]
    NotInQuiz,
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("unknown mission {0}")]
    UnknownMission(MissionId),
    #[error("unknown lesson {0}")]
    UnknownLesson(LessonId),
    #[error("mission {0} still has unfinished lessons")]
    MissionIncomplete(MissionId),
}
