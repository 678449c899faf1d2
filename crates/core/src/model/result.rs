use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::model::{AnswerRecord, Question, QuizMode, Subject};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("no questions to summarize")]
    Empty,

    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("{answered} recorded answers for {total} questions")]
    Incomplete { answered: usize, total: usize },

    #[error("too many questions for a single session: {len}")]
    TooManyQuestions { len: usize },
}

/// Per-question line in a completed session's breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question: Question,
    pub selected: Option<String>,
    pub is_correct: bool,
    pub time_taken: Duration,
}

/// Aggregate outcome of a completed quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    mode: QuizMode,
    subject: Subject,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    score: u32,
    total: u32,
    accuracy_percent: u32,
    total_time: Duration,
    breakdown: Vec<QuestionOutcome>,
}

impl QuizResult {
    /// Build a result from a completed session's questions and answers.
    ///
    /// The score is recomputed here from the answer records, so it always
    /// equals the number of correct answers.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError::Incomplete` unless every question has
    /// exactly one recorded answer, `QuizResultError::Empty` for a
    /// question-less session, and `QuizResultError::InvalidTimeRange` when
    /// `completed_at` precedes `started_at`.
    pub fn from_answers(
        mode: QuizMode,
        subject: Subject,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        questions: &[Question],
        answers: &[AnswerRecord],
    ) -> Result<Self, QuizResultError> {
        if questions.is_empty() {
            return Err(QuizResultError::Empty);
        }
        if completed_at < started_at {
            return Err(QuizResultError::InvalidTimeRange);
        }
        if answers.len() != questions.len() {
            return Err(QuizResultError::Incomplete {
                answered: answers.len(),
                total: questions.len(),
            });
        }

        let total = u32::try_from(questions.len()).map_err(|_| QuizResultError::TooManyQuestions {
            len: questions.len(),
        })?;

        let mut score = 0_u32;
        let mut total_time = Duration::zero();
        let mut breakdown = Vec::with_capacity(questions.len());
        for (question, answer) in questions.iter().zip(answers) {
            if answer.is_correct() {
                score = score.saturating_add(1);
            }
            total_time = total_time
                .checked_add(&answer.time_taken())
                .unwrap_or(Duration::MAX);
            breakdown.push(QuestionOutcome {
                question: question.clone(),
                selected: answer.selected().map(str::to_owned),
                is_correct: answer.is_correct(),
                time_taken: answer.time_taken(),
            });
        }

        Ok(Self {
            mode,
            subject,
            started_at,
            completed_at,
            score,
            total,
            accuracy_percent: accuracy_percent(score, total),
            total_time,
            breakdown,
        })
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Share of correct answers, rounded to the nearest whole percent.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        self.accuracy_percent
    }

    /// Sum of recorded per-question times.
    #[must_use]
    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    /// Total time rounded to whole seconds for display.
    #[must_use]
    pub fn total_time_display_seconds(&self) -> i64 {
        (self.total_time.num_milliseconds() + 500).div_euclid(1000)
    }

    #[must_use]
    pub fn breakdown(&self) -> &[QuestionOutcome] {
        &self.breakdown
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn accuracy_percent(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(score) * 100.0 / f64::from(total)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn build_question(n: usize) -> Question {
        Question::new(
            format!("Q{n}"),
            "right",
            vec!["wrong".into(), "right".into(), "other".into()],
        )
        .unwrap()
    }

    fn correct(secs: i64) -> AnswerRecord {
        AnswerRecord::answered("right".into(), Duration::seconds(secs), true)
    }

    fn wrong(secs: i64) -> AnswerRecord {
        AnswerRecord::answered("wrong".into(), Duration::seconds(secs), false)
    }

    #[test]
    fn seven_of_ten_is_seventy_percent() {
        let questions: Vec<_> = (0..10).map(build_question).collect();
        let mut answers: Vec<_> = (0..7).map(|_| correct(2)).collect();
        answers.extend((0..3).map(|_| wrong(4)));

        let result = QuizResult::from_answers(
            QuizMode::Blitz,
            Subject::History,
            fixed_now(),
            fixed_now() + Duration::seconds(60),
            &questions,
            &answers,
        )
        .unwrap();

        assert_eq!(result.score(), 7);
        assert_eq!(result.total(), 10);
        assert_eq!(result.accuracy_percent(), 70);
        assert_eq!(result.total_time(), Duration::seconds(26));
        assert_eq!(result.breakdown().len(), 10);
    }

    #[test]
    fn score_matches_correct_count_in_breakdown() {
        let questions: Vec<_> = (0..4).map(build_question).collect();
        let answers = vec![
            correct(1),
            wrong(2),
            AnswerRecord::expired(Duration::seconds(10)),
            correct(3),
        ];

        let result = QuizResult::from_answers(
            QuizMode::Practice,
            Subject::Music,
            fixed_now(),
            fixed_now() + Duration::seconds(30),
            &questions,
            &answers,
        )
        .unwrap();

        let correct_rows = result.breakdown().iter().filter(|o| o.is_correct).count();
        assert_eq!(result.score() as usize, correct_rows);
        assert_eq!(result.accuracy_percent(), 50);
        assert_eq!(result.breakdown()[2].selected, None);
    }

    #[test]
    fn missing_answers_are_rejected() {
        let questions: Vec<_> = (0..3).map(build_question).collect();
        let answers = vec![correct(1)];

        let err = QuizResult::from_answers(
            QuizMode::Blitz,
            Subject::Sports,
            fixed_now(),
            fixed_now(),
            &questions,
            &answers,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            QuizResultError::Incomplete {
                answered: 1,
                total: 3
            }
        ));
    }

    #[test]
    fn reversed_time_range_is_rejected() {
        let questions = vec![build_question(0)];
        let answers = vec![correct(1)];

        let err = QuizResult::from_answers(
            QuizMode::Blitz,
            Subject::Sports,
            fixed_now(),
            fixed_now() - Duration::seconds(1),
            &questions,
            &answers,
        )
        .unwrap_err();

        assert!(matches!(err, QuizResultError::InvalidTimeRange));
    }
}
