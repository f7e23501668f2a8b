//! Session lifecycle around the state machine: dialogue requests are stamped
//! with a generation counter so a script fetched for an abandoned session is
//! discarded instead of leaking into the next one.

use mentor_core::model::{DialogueScript, Lesson, LessonId, Mission};

use crate::error::SessionError;
use crate::sessions::session::LessonSession;

/// Stamp issued when a dialogue fetch is started. Redeemable only while its
/// session is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptTicket {
    generation: u64,
}

/// Outcome of handing a fetched script back to the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Applied,
    /// The ticket no longer matches the open session; the script was dropped.
    Stale,
}

/// Holds the single open lesson session, if any.
#[derive(Default)]
pub struct LessonWorkflow {
    session: Option<LessonSession>,
    generation: u64,
}

impl LessonWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a lesson, replacing any session already in flight, and return the
    /// ticket for its intro dialogue fetch.
    pub fn open_lesson(
        &mut self,
        mission: &Mission,
        lesson: &Lesson,
        already_completed: bool,
    ) -> ScriptTicket {
        self.generation += 1;
        self.session = Some(LessonSession::open(mission, lesson, already_completed));
        ScriptTicket {
            generation: self.generation,
        }
    }

    /// Review mode: choose to replay the intro, invalidating any earlier
    /// ticket and returning a fresh one for the re-fetch.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if no session is open or it is not awaiting a
    /// review choice.
    pub fn begin_replay(&mut self) -> Result<ScriptTicket, SessionError> {
        let session = self
            .session
            .as_mut()
            .ok_or(SessionError::NotAwaitingReviewChoice)?;
        session.replay_intro()?;
        self.generation += 1;
        Ok(ScriptTicket {
            generation: self.generation,
        })
    }

    /// Hand a fetched script to the open session. A stale ticket is not an
    /// error; the script is silently dropped.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the ticket is current but the session cannot
    /// accept a script.
    pub fn deliver_script(
        &mut self,
        ticket: ScriptTicket,
        script: DialogueScript,
    ) -> Result<Delivery, SessionError> {
        if ticket.generation != self.generation {
            return Ok(Delivery::Stale);
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(Delivery::Stale);
        };
        session.attach_script(script)?;
        Ok(Delivery::Applied)
    }

    /// Drop the open session without completing it. Pending dialogue fetches
    /// become stale.
    pub fn abandon(&mut self) {
        self.session = None;
        self.generation += 1;
    }

    /// Take the completed session, yielding its lesson id. Returns `None`
    /// while no session is open or it has not completed.
    pub fn finalize(&mut self) -> Option<LessonId> {
        if self.session.as_ref()?.is_completed() {
            self.generation += 1;
            self.session.take().map(|s| s.lesson_id().clone())
        } else {
            None
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&LessonSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut LessonSession> {
        self.session.as_mut()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::session::LessonPhase;
    use mentor_core::model::{Catalog, DialogueTurn};

    fn flagship() -> (Mission, Lesson) {
        let catalog = Catalog::builtin();
        let mission = catalog.mission(&"1-1".into()).unwrap().clone();
        let lesson = mission.lessons[0].clone();
        (mission, lesson)
    }

    fn script() -> DialogueScript {
        DialogueScript::single(DialogueTurn::mentor("사라 사수", "안녕하세요"))
    }

    #[test]
    fn script_for_an_abandoned_session_is_dropped() {
        let (mission, lesson) = flagship();
        let mut workflow = LessonWorkflow::new();
        let ticket = workflow.open_lesson(&mission, &lesson, false);
        workflow.abandon();

        assert_eq!(workflow.deliver_script(ticket, script()), Ok(Delivery::Stale));
        assert!(workflow.session().is_none());
    }

    #[test]
    fn script_for_a_superseded_session_is_dropped() {
        let (mission, lesson) = flagship();
        let mut workflow = LessonWorkflow::new();
        let old_ticket = workflow.open_lesson(&mission, &lesson, false);
        let new_ticket = workflow.open_lesson(&mission, &lesson, false);

        assert_eq!(
            workflow.deliver_script(old_ticket, script()),
            Ok(Delivery::Stale)
        );
        // the stale delivery left the new session untouched
        assert_eq!(
            workflow.deliver_script(new_ticket, script()),
            Ok(Delivery::Applied)
        );
    }

    #[test]
    fn replay_invalidates_the_opening_ticket() {
        let (mission, lesson) = flagship();
        let mut workflow = LessonWorkflow::new();
        let open_ticket = workflow.open_lesson(&mission, &lesson, true);
        let replay_ticket = workflow.begin_replay().unwrap();

        assert_eq!(
            workflow.deliver_script(open_ticket, script()),
            Ok(Delivery::Stale)
        );
        assert_eq!(
            workflow.deliver_script(replay_ticket, script()),
            Ok(Delivery::Applied)
        );
    }

    #[test]
    fn finalize_only_yields_completed_sessions() {
        let (mission, lesson) = flagship();
        let mut workflow = LessonWorkflow::new();
        let ticket = workflow.open_lesson(&mission, &lesson, false);
        assert!(workflow.finalize().is_none());

        workflow.deliver_script(ticket, script()).unwrap();
        let session = workflow.session_mut().unwrap();
        session.advance().unwrap();
        session.acknowledge_guidebook().unwrap();
        session.submit_choice(1).unwrap();
        session.submit_short("리텐션").unwrap();
        assert_eq!(session.phase(), LessonPhase::Completed);

        assert_eq!(workflow.finalize(), Some(lesson.id.clone()));
        assert!(workflow.session().is_none());
        assert!(workflow.finalize().is_none());
    }
}
