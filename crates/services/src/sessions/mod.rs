//! Lesson session orchestration.

mod session;
mod workflow;

pub use session::{
    AdvanceOutcome, GuidebookOutcome, LessonPhase, LessonSession, QuizFeedback, QuizStage,
    SessionMode, XP_PER_TURN,
};
pub use workflow::{Delivery, LessonWorkflow, ScriptTicket};
