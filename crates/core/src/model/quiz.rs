use serde::{Deserialize, Serialize};

/// Two-stage knowledge check attached to a lesson: a multiple-choice
/// question gating a free-text short answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub choice: MultipleChoice,
    pub short: ShortAnswer,
}

/// Multiple-choice stage. `correct_index` is 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoice {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl MultipleChoice {
    #[must_use]
    pub fn check(&self, selected_index: usize) -> bool {
        selected_index == self.correct_index
    }
}

/// Short-answer stage, compared after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortAnswer {
    pub question: String,
    pub answer: String,
}

impl ShortAnswer {
    /// Case- and whitespace-insensitive exact match.
    #[must_use]
    pub fn check(&self, input: &str) -> bool {
        normalize(input) == normalize(&self.answer)
    }

    /// Character count of the expected answer, for the miss hint.
    /// Reveals length only, never content.
    #[must_use]
    pub fn hint_chars(&self) -> usize {
        self.answer.chars().count()
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
