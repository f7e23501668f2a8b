mod catalog;
mod dialogue;
mod ids;
pub mod markup;
mod profile;
mod progress;
mod quiz;

pub use catalog::{Catalog, LearningUnit, Lesson, Mission};
pub use dialogue::{DialoguePhase, DialogueScript, DialogueTurn};
pub use ids::{LessonId, MissionId};
pub use profile::{
    CareerGoal, LearningPath, MentorshipProfile, Proficiency, TargetIndustry, TargetRole,
};
pub use progress::{Level, ProgressError, UserProgress, progress_percent};
pub use quiz::{MultipleChoice, Quiz, ShortAnswer};
