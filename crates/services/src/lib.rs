#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod leaderboard;
pub mod mentor;
pub mod progress_service;
pub mod sessions;
pub mod sync;

pub use mentor_core::Clock;

pub use app_services::AppServices;
pub use error::{MentorError, ProgressServiceError, SessionError};
pub use leaderboard::{LeaderboardService, Ranker};
pub use mentor::{MentorConfig, MentorService};
pub use progress_service::ProgressService;
pub use sessions::{
    AdvanceOutcome, Delivery, GuidebookOutcome, LessonPhase, LessonSession, LessonWorkflow,
    QuizFeedback, QuizStage, ScriptTicket, SessionMode, XP_PER_TURN,
};
pub use sync::RemoteSync;
