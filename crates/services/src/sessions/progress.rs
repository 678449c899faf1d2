use chrono::Duration;

use quiz_core::model::Question;

use super::service::SessionPhase;

/// Presentation-agnostic snapshot of a session after a transition.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no styling or layout assumptions
///
/// The UI re-renders from the latest snapshot after every engine event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub current_index: usize,
    pub total: usize,
    pub score: u32,
    pub remaining_time: Duration,
    pub epoch: u64,
    pub question: Option<QuestionView>,
    pub feedback: Option<FeedbackView>,
}

/// The current question as the player sees it.
///
/// Deliberately omits the correct answer; it only appears in
/// [`FeedbackView`] once the question has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub text: String,
    pub answers: Vec<String>,
}

impl QuestionView {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            text: question.text().to_owned(),
            answers: question.answers().to_vec(),
        }
    }
}

/// Post-answer feedback shown while the display delay runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub selected: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}
