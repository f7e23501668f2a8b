use serde::{Deserialize, Serialize};

use crate::model::markup::{self, Segment};

/// Which mentor briefing a dialogue request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialoguePhase {
    /// Briefing before the learner opens the guidebook.
    Intro,
    /// Feedback after the work is done.
    Outro,
}

/// One exchange unit of a mentor conversation.
///
/// Serde names follow the generator's response schema
/// (`{speaker, text, isUserTurn}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueTurn {
    pub speaker: String,
    pub text: String,
    pub is_user_turn: bool,
}

impl DialogueTurn {
    #[must_use]
    pub fn mentor(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            is_user_turn: false,
        }
    }

    #[must_use]
    pub fn learner(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            is_user_turn: true,
        }
    }

    /// Split the turn text into renderable segments (`**bold**`,
    /// `[label](url)` links, plain text).
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        markup::parse(&self.text)
    }
}

/// An ordered, finite, guaranteed non-empty sequence of dialogue turns.
///
/// Consumed strictly in order by the lesson session; the non-empty invariant
/// is what lets the session state machine never deadlock in a loading state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogueScript(Vec<DialogueTurn>);

impl DialogueScript {
    /// Returns `None` for an empty turn list.
    #[must_use]
    pub fn new(turns: Vec<DialogueTurn>) -> Option<Self> {
        if turns.is_empty() { None } else { Some(Self(turns)) }
    }

    #[must_use]
    pub fn single(turn: DialogueTurn) -> Self {
        Self(vec![turn])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        // Held non-empty by construction.
        false
    }

    #[must_use]
    pub fn turns(&self) -> &[DialogueTurn] {
        &self.0
    }

    #[must_use]
    pub fn turn(&self, index: usize) -> Option<&DialogueTurn> {
        self.0.get(index)
    }
}
