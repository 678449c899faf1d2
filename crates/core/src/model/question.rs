use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,

    #[error("a question needs at least two answer choices, got {0}")]
    TooFewAnswers(usize),

    #[error("correct answer appears {count} times in the answer list")]
    CorrectAnswerCount { count: usize },
}

/// A single multiple-choice question with its shuffled answer choices.
///
/// Immutable once built. The answer list always contains `correct_answer`
/// exactly once; the constructor rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    correct_answer: String,
    answers: Vec<String>,
}

impl Question {
    /// Build a question from already-normalized text and answer choices.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` for blank question text,
    /// `QuestionError::TooFewAnswers` for fewer than two choices, and
    /// `QuestionError::CorrectAnswerCount` when the correct answer is not
    /// present exactly once among the choices.
    pub fn new(
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        answers: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let correct_answer = correct_answer.into();

        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if answers.len() < 2 {
            return Err(QuestionError::TooFewAnswers(answers.len()));
        }
        let count = answers.iter().filter(|a| **a == correct_answer).count();
        if count != 1 {
            return Err(QuestionError::CorrectAnswerCount { count });
        }

        Ok(Self {
            text,
            correct_answer,
            answers,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Answer choices in presentation order.
    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Whether the given choice is this question's correct answer.
    #[must_use]
    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.correct_answer
    }
}
