//! Ephemeral per-lesson state machine: intro dialogue, guidebook, optional
//! quiz. Dropped entirely once the lesson is finalized.

use mentor_core::model::{DialogueScript, DialogueTurn, Lesson, LessonId, Mission, MissionId};

use crate::error::SessionError;

/// XP shown per revealed dialogue turn. Cosmetic only; discarded at finalize.
pub const XP_PER_TURN: u32 = 10;

const CHOICE_RETRY_MESSAGE: &str = "틀렸습니다! 가이드북 내용을 다시 한번 확인해 보세요.";

/// Current phase of a lesson session. Transitions are one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonPhase {
    IntroChat,
    Guidebook,
    Quiz,
    Completed,
}

/// Whether the lesson is being taken for the first time or revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    FirstRun,
    Review,
}

/// Which quiz stage is accepting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStage {
    Choice,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// One more turn became visible; the value is its index.
    Revealed(usize),
    /// The script is exhausted and the session moved to the guidebook.
    GuidebookEntered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidebookOutcome {
    QuizEntered,
    /// Lesson has no quiz; the session completed directly.
    LessonFinished,
}

/// Feedback for a quiz submission. Misses are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizFeedback {
    /// Multiple choice correct; the short-answer stage is next.
    ChoiceCorrect,
    /// Wrong answer; stay on the current stage.
    Retry(String),
    /// Short answer correct; the lesson is done.
    LessonCompleted,
}

enum ScriptState {
    Pending,
    Ready(DialogueScript),
}

/// State machine for a single open lesson.
///
/// Opening an already-completed lesson enters review mode, which first asks
/// whether to replay the intro or jump straight to the guidebook, and never
/// accrues XP.
pub struct LessonSession {
    mission_id: MissionId,
    lesson: Lesson,
    mode: SessionMode,
    phase: LessonPhase,
    awaiting_review_choice: bool,
    script: ScriptState,
    revealed: usize,
    quiz_stage: QuizStage,
    accumulated_xp: u32,
}

impl LessonSession {
    #[must_use]
    pub fn open(mission: &Mission, lesson: &Lesson, already_completed: bool) -> Self {
        let mode = if already_completed {
            SessionMode::Review
        } else {
            SessionMode::FirstRun
        };
        Self {
            mission_id: mission.id.clone(),
            lesson: lesson.clone(),
            mode,
            phase: LessonPhase::IntroChat,
            awaiting_review_choice: already_completed,
            script: ScriptState::Pending,
            revealed: 0,
            quiz_stage: QuizStage::Choice,
            accumulated_xp: 0,
        }
    }

    #[must_use]
    pub fn mission_id(&self) -> &MissionId {
        &self.mission_id
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson.id
    }

    #[must_use]
    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> LessonPhase {
        self.phase
    }

    #[must_use]
    pub fn awaiting_review_choice(&self) -> bool {
        self.awaiting_review_choice
    }

    #[must_use]
    pub fn quiz_stage(&self) -> QuizStage {
        self.quiz_stage
    }

    /// Display-only XP accrued while revealing turns.
    #[must_use]
    pub fn cosmetic_xp(&self) -> u32 {
        self.accumulated_xp
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == LessonPhase::Completed
    }

    /// Turns revealed so far, in order. Empty while the script is pending.
    #[must_use]
    pub fn revealed_turns(&self) -> &[DialogueTurn] {
        match &self.script {
            ScriptState::Pending => &[],
            ScriptState::Ready(script) => &script.turns()[..self.revealed],
        }
    }

    /// Review mode: re-fetch the intro dialogue and replay it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAwaitingReviewChoice` outside the review
    /// prompt.
    pub fn replay_intro(&mut self) -> Result<(), SessionError> {
        if !self.awaiting_review_choice {
            return Err(SessionError::NotAwaitingReviewChoice);
        }
        self.awaiting_review_choice = false;
        Ok(())
    }

    /// Review mode: skip the dialogue entirely.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAwaitingReviewChoice` outside the review
    /// prompt.
    pub fn jump_to_guidebook(&mut self) -> Result<(), SessionError> {
        if !self.awaiting_review_choice {
            return Err(SessionError::NotAwaitingReviewChoice);
        }
        self.awaiting_review_choice = false;
        self.phase = LessonPhase::Guidebook;
        Ok(())
    }

    /// Attach the fetched dialogue script and reveal its first turn.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the session is not waiting for a script in
    /// the intro phase.
    pub fn attach_script(&mut self, script: DialogueScript) -> Result<(), SessionError> {
        if self.awaiting_review_choice {
            return Err(SessionError::AwaitingReviewChoice);
        }
        if self.phase != LessonPhase::IntroChat {
            return Err(SessionError::NotInDialogue);
        }
        if matches!(self.script, ScriptState::Ready(_)) {
            return Err(SessionError::ScriptAlreadyAttached);
        }
        self.script = ScriptState::Ready(script);
        self.revealed = 1;
        Ok(())
    }

    /// Reveal the next turn, or move to the guidebook when the script is
    /// exhausted. Each revealed turn adds cosmetic XP on a first run.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::DialoguePending` while the script has not
    /// arrived, and phase errors outside the intro dialogue.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        if self.awaiting_review_choice {
            return Err(SessionError::AwaitingReviewChoice);
        }
        if self.phase != LessonPhase::IntroChat {
            return Err(SessionError::NotInDialogue);
        }
        let script = match &self.script {
            ScriptState::Pending => return Err(SessionError::DialoguePending),
            ScriptState::Ready(script) => script,
        };

        if self.revealed < script.len() {
            let index = self.revealed;
            self.revealed += 1;
            if self.mode == SessionMode::FirstRun {
                self.accumulated_xp += XP_PER_TURN;
            }
            Ok(AdvanceOutcome::Revealed(index))
        } else {
            self.phase = LessonPhase::Guidebook;
            Ok(AdvanceOutcome::GuidebookEntered)
        }
    }

    /// Single trusted confirmation that the guidebook was worked through.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInGuidebook` outside the guidebook phase.
    pub fn acknowledge_guidebook(&mut self) -> Result<GuidebookOutcome, SessionError> {
        if self.phase != LessonPhase::Guidebook {
            return Err(SessionError::NotInGuidebook);
        }
        if self.lesson.quiz.is_some() {
            self.phase = LessonPhase::Quiz;
            self.quiz_stage = QuizStage::Choice;
            Ok(GuidebookOutcome::QuizEntered)
        } else {
            self.phase = LessonPhase::Completed;
            Ok(GuidebookOutcome::LessonFinished)
        }
    }

    /// Submit the multiple-choice answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInQuiz` outside the choice stage.
    pub fn submit_choice(&mut self, selected_index: usize) -> Result<QuizFeedback, SessionError> {
        if self.phase != LessonPhase::Quiz || self.quiz_stage != QuizStage::Choice {
            return Err(SessionError::NotInQuiz);
        }
        let Some(quiz) = &self.lesson.quiz else {
            return Err(SessionError::NotInQuiz);
        };
        if quiz.choice.check(selected_index) {
            self.quiz_stage = QuizStage::Short;
            Ok(QuizFeedback::ChoiceCorrect)
        } else {
            Ok(QuizFeedback::Retry(CHOICE_RETRY_MESSAGE.to_string()))
        }
    }

    /// Submit the short answer; a match completes the lesson, a miss hints
    /// at the expected answer's length.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInQuiz` outside the short-answer stage.
    pub fn submit_short(&mut self, input: &str) -> Result<QuizFeedback, SessionError> {
        if self.phase != LessonPhase::Quiz || self.quiz_stage != QuizStage::Short {
            return Err(SessionError::NotInQuiz);
        }
        let Some(quiz) = &self.lesson.quiz else {
            return Err(SessionError::NotInQuiz);
        };
        if quiz.short.check(input) {
            self.phase = LessonPhase::Completed;
            Ok(QuizFeedback::LessonCompleted)
        } else {
            Ok(QuizFeedback::Retry(format!(
                "정답이 아닙니다. (힌트: {}글자)",
                quiz.short.hint_chars()
            )))
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::model::{Catalog, DialogueTurn};

    fn flagship() -> (Mission, Lesson) {
        let catalog = Catalog::builtin();
        let mission = catalog.mission(&"1-1".into()).unwrap().clone();
        let lesson = mission.lessons[0].clone();
        (mission, lesson)
    }

    fn quizless() -> (Mission, Lesson) {
        let catalog = Catalog::builtin();
        let mission = catalog.mission(&"2-1".into()).unwrap().clone();
        let lesson = mission.lessons[0].clone();
        (mission, lesson)
    }

    fn script(n: usize) -> DialogueScript {
        let turns = (0..n)
            .map(|i| DialogueTurn::mentor("사라 사수", format!("turn {i}")))
            .collect();
        DialogueScript::new(turns).unwrap()
    }

    #[test]
    fn advance_before_script_arrival_is_pending() {
        let (mission, lesson) = flagship();
        let mut session = LessonSession::open(&mission, &lesson, false);
        assert_eq!(session.advance(), Err(SessionError::DialoguePending));
        assert!(session.revealed_turns().is_empty());
    }

    #[test]
    fn n_turn_script_takes_n_advances_to_leave_the_chat() {
        let (mission, lesson) = flagship();
        let mut session = LessonSession::open(&mission, &lesson, false);
        session.attach_script(script(5)).unwrap();
        assert_eq!(session.revealed_turns().len(), 1);

        for expected in 1..5 {
            assert_eq!(session.advance(), Ok(AdvanceOutcome::Revealed(expected)));
        }
        assert_eq!(session.revealed_turns().len(), 5);
        assert_eq!(session.cosmetic_xp(), 4 * XP_PER_TURN);

        assert_eq!(session.advance(), Ok(AdvanceOutcome::GuidebookEntered));
        assert_eq!(session.phase(), LessonPhase::Guidebook);
        // no XP for the transition itself
        assert_eq!(session.cosmetic_xp(), 4 * XP_PER_TURN);
    }

    #[test]
    fn single_turn_script_goes_straight_to_the_guidebook() {
        let (mission, lesson) = flagship();
        let mut session = LessonSession::open(&mission, &lesson, false);
        session.attach_script(script(1)).unwrap();
        assert_eq!(session.advance(), Ok(AdvanceOutcome::GuidebookEntered));
        assert_eq!(session.cosmetic_xp(), 0);
    }

    #[test]
    fn second_script_attachment_is_rejected() {
        let (mission, lesson) = flagship();
        let mut session = LessonSession::open(&mission, &lesson, false);
        session.attach_script(script(2)).unwrap();
        assert_eq!(
            session.attach_script(script(2)),
            Err(SessionError::ScriptAlreadyAttached)
        );
    }

    #[test]
    fn quiz_gates_short_answer_behind_the_choice() {
        let (mission, lesson) = flagship();
        let mut session = LessonSession::open(&mission, &lesson, false);
        session.attach_script(script(1)).unwrap();
        session.advance().unwrap();
        assert_eq!(
            session.acknowledge_guidebook(),
            Ok(GuidebookOutcome::QuizEntered)
        );

        // short answer before the MCQ is a sequencing error
        assert_eq!(session.submit_short("리텐션"), Err(SessionError::NotInQuiz));

        // wrong choice stays on the choice stage
        let feedback = session.submit_choice(0).unwrap();
        assert!(matches!(feedback, QuizFeedback::Retry(_)));
        assert_eq!(session.quiz_stage(), QuizStage::Choice);

        assert_eq!(session.submit_choice(1), Ok(QuizFeedback::ChoiceCorrect));
        assert_eq!(session.quiz_stage(), QuizStage::Short);

        // miss hints at the answer length in characters
        match session.submit_short("이탈률").unwrap() {
            QuizFeedback::Retry(message) => assert!(message.contains("3글자")),
            other => panic!("expected a retry, got {other:?}"),
        }

        assert_eq!(
            session.submit_short(" 리 텐 션 "),
            Ok(QuizFeedback::LessonCompleted)
        );
        assert!(session.is_completed());
    }

    #[test]
    fn lesson_without_quiz_completes_at_the_guidebook() {
        let (mission, lesson) = quizless();
        let mut session = LessonSession::open(&mission, &lesson, false);
        session.attach_script(script(1)).unwrap();
        session.advance().unwrap();
        assert_eq!(
            session.acknowledge_guidebook(),
            Ok(GuidebookOutcome::LessonFinished)
        );
        assert!(session.is_completed());
    }

    #[test]
    fn review_blocks_everything_until_a_choice_is_made() {
        let (mission, lesson) = flagship();
        let mut session = LessonSession::open(&mission, &lesson, true);
        assert_eq!(session.mode(), SessionMode::Review);
        assert!(session.awaiting_review_choice());
        assert_eq!(session.advance(), Err(SessionError::AwaitingReviewChoice));
        assert_eq!(
            session.attach_script(script(1)),
            Err(SessionError::AwaitingReviewChoice)
        );
    }

    #[test]
    fn review_replay_accrues_no_xp() {
        let (mission, lesson) = flagship();
        let mut session = LessonSession::open(&mission, &lesson, true);
        session.replay_intro().unwrap();
        session.attach_script(script(4)).unwrap();
        while session.phase() == LessonPhase::IntroChat {
            session.advance().unwrap();
        }
        assert_eq!(session.cosmetic_xp(), 0);
    }

    #[test]
    fn review_can_jump_straight_to_the_guidebook() {
        let (mission, lesson) = flagship();
        let mut session = LessonSession::open(&mission, &lesson, true);
        session.jump_to_guidebook().unwrap();
        assert_eq!(session.phase(), LessonPhase::Guidebook);
        // the choice is one-shot
        assert_eq!(
            session.jump_to_guidebook(),
            Err(SessionError::NotAwaitingReviewChoice)
        );
    }

    #[test]
    fn first_run_never_awaits_a_review_choice() {
        let (mission, lesson) = flagship();
        let mut session = LessonSession::open(&mission, &lesson, false);
        assert_eq!(
            session.replay_intro(),
            Err(SessionError::NotAwaitingReviewChoice)
        );
    }
}
