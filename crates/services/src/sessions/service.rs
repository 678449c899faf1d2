use chrono::{DateTime, Duration, Utc};
use std::fmt;

use quiz_core::model::{AnswerRecord, Question, QuizResult, SessionConfig};

use super::progress::{FeedbackView, QuestionView, SessionSnapshot};
use crate::error::SessionError;

//
// ─── PHASES AND TRANSITION OUTCOMES ───────────────────────────────────────────
//

/// Lifecycle phase of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the question fetch to complete.
    Loading,
    /// Counting down on the current question.
    InProgress,
    /// Every question resolved; terminal.
    Completed,
}

/// What a submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The answer was recorded for the question at `index`.
    Recorded { index: usize, is_correct: bool },
    /// The current question already had an answer; nothing changed.
    Ignored,
}

/// What a countdown tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick referenced a superseded question epoch and was discarded.
    Stale,
    /// A countdown (question or feedback) is still running.
    Counting,
    /// The countdown hit zero; the question at `index` was recorded as
    /// missed, exactly as a wrong manual submission.
    Expired { index: usize },
    /// The feedback delay finished and the session moved on.
    Advanced,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state machine for one run through a batch of questions.
///
/// `Loading -> InProgress -> Completed`, driven entirely by discrete events:
/// question delivery, answer submission, and timer ticks. The session never
/// reads the wall clock; callers pass timestamps from their time source, and
/// countdown advances only through [`QuizSession::tick`].
///
/// Each question carries an epoch; ticks quote the epoch they were scheduled
/// against, so a timer that outlives its question is discarded instead of
/// touching the successor.
pub struct QuizSession {
    config: SessionConfig,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    answers: Vec<Option<AnswerRecord>>,
    remaining: Duration,
    feedback_remaining: Option<Duration>,
    epoch: u64,
    phase: SessionPhase,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// A session awaiting its question fetch.
    #[must_use]
    pub fn loading(config: SessionConfig, started_at: DateTime<Utc>) -> Self {
        Self {
            remaining: config.per_question_time_limit(),
            config,
            questions: Vec::new(),
            current: 0,
            score: 0,
            answers: Vec::new(),
            feedback_remaining: None,
            epoch: 0,
            phase: SessionPhase::Loading,
            started_at,
            completed_at: None,
        }
    }

    /// The fetch-completion event: hand the session its question batch.
    ///
    /// On failure the session stays in `Loading` with no partial state, so
    /// the caller may fetch and deliver again.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for an empty batch and
    /// `SessionError::AlreadyStarted` outside the `Loading` phase.
    pub fn deliver_questions(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Loading {
            return Err(SessionError::AlreadyStarted);
        }
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        self.answers = vec![None; questions.len()];
        self.questions = questions;
        self.current = 0;
        self.score = 0;
        self.remaining = self.config.per_question_time_limit();
        self.feedback_remaining = None;
        self.epoch = self.epoch.wrapping_add(1);
        self.phase = SessionPhase::InProgress;
        Ok(())
    }

    /// Build a session that already has its questions.
    ///
    /// `started_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn start(
        config: SessionConfig,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let mut session = Self::loading(config, started_at);
        session.deliver_questions(questions)?;
        Ok(session)
    }

    //
    // ─── TRANSITIONS ──────────────────────────────────────────────────────
    //

    /// Record the player's choice for the current question.
    ///
    /// A question that already has a recorded answer ignores further
    /// submissions, so whichever of "player click" and "timer expiry" is
    /// processed first wins and the other is a no-op. The elapsed time is
    /// taken from the countdown at the submission instant.
    ///
    /// `now` should come from the services layer clock; it only stamps
    /// `completed_at` when this submission finishes the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` in `Loading` and
    /// `SessionError::Completed` after the session has finished.
    pub fn submit_answer(
        &mut self,
        selected: &str,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, SessionError> {
        match self.phase {
            SessionPhase::Loading => return Err(SessionError::NotStarted),
            SessionPhase::Completed => return Err(SessionError::Completed),
            SessionPhase::InProgress => {}
        }
        if self.answers[self.current].is_some() {
            return Ok(SubmitOutcome::Ignored);
        }

        Ok(self.record_answer(Some(selected), now))
    }

    /// Advance session time by `delta`.
    ///
    /// `epoch` is the question epoch the caller's timer was scheduled
    /// against; a stale epoch means the timer outlived its question and the
    /// tick is discarded. When the question countdown reaches zero with no
    /// recorded answer, the question is scored as missed through the same
    /// path as a manual submission. During the post-answer feedback window
    /// the tick drains the feedback delay instead of the countdown.
    pub fn tick(&mut self, epoch: u64, delta: Duration, now: DateTime<Utc>) -> TickOutcome {
        if self.phase != SessionPhase::InProgress || epoch != self.epoch {
            return TickOutcome::Stale;
        }

        if let Some(feedback) = self.feedback_remaining {
            let left = feedback - delta;
            if left > Duration::zero() {
                self.feedback_remaining = Some(left);
                return TickOutcome::Counting;
            }
            self.advance(now);
            return TickOutcome::Advanced;
        }

        self.remaining = std::cmp::max(self.remaining - delta, Duration::zero());
        if self.remaining > Duration::zero() {
            return TickOutcome::Counting;
        }

        let index = self.current;
        self.record_answer(None, now);
        TickOutcome::Expired { index }
    }

    fn record_answer(&mut self, selected: Option<&str>, now: DateTime<Utc>) -> SubmitOutcome {
        let question = &self.questions[self.current];
        let elapsed = self.config.per_question_time_limit() - self.remaining;
        let record = match selected {
            Some(choice) => {
                AnswerRecord::answered(choice.to_owned(), elapsed, question.is_correct(choice))
            }
            None => AnswerRecord::expired(elapsed),
        };

        if record.is_correct() {
            self.score = self.score.saturating_add(1);
        }
        let outcome = SubmitOutcome::Recorded {
            index: self.current,
            is_correct: record.is_correct(),
        };
        self.answers[self.current] = Some(record);

        if self.config.post_answer_delay().is_zero() {
            self.advance(now);
        } else {
            self.feedback_remaining = Some(self.config.post_answer_delay());
        }
        outcome
    }

    /// Move past the current question; completes and freezes the session
    /// after the last one. Bumping the epoch here is what invalidates any
    /// timer still scheduled against the finished question.
    fn advance(&mut self, now: DateTime<Utc>) {
        self.epoch = self.epoch.wrapping_add(1);
        self.feedback_remaining = None;
        self.current += 1;
        if self.current >= self.questions.len() {
            self.phase = SessionPhase::Completed;
            self.completed_at = Some(now);
        } else {
            self.remaining = self.config.per_question_time_limit();
        }
    }

    //
    // ─── ACCESSORS ────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    /// Index of the question currently being asked; equals
    /// [`QuizSession::total_questions`] once the session has completed.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Countdown left on the current question.
    #[must_use]
    pub fn remaining_time(&self) -> Duration {
        self.remaining
    }

    /// Epoch of the current question; quoted back by timer ticks.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether the post-answer feedback window is running.
    #[must_use]
    pub fn in_feedback(&self) -> bool {
        self.feedback_remaining.is_some()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&AnswerRecord> {
        self.answers.get(index).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().flatten().count()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Presentation-agnostic snapshot for the UI to re-render from.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let feedback = if self.in_feedback() {
            self.answer(self.current).and_then(|record| {
                self.questions.get(self.current).map(|question| FeedbackView {
                    selected: record.selected().map(str::to_owned),
                    correct_answer: question.correct_answer().to_owned(),
                    is_correct: record.is_correct(),
                })
            })
        } else {
            None
        };

        SessionSnapshot {
            phase: self.phase,
            current_index: self.current,
            total: self.questions.len(),
            score: self.score,
            remaining_time: self.remaining,
            epoch: self.epoch,
            question: self.current_question().map(QuestionView::from_question),
            feedback,
        }
    }

    /// Aggregate the finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` while the session has not
    /// completed.
    pub fn result(&self) -> Result<QuizResult, SessionError> {
        if self.phase != SessionPhase::Completed {
            return Err(SessionError::Incomplete);
        }
        let completed_at = self.completed_at.ok_or(SessionError::Incomplete)?;
        let answers: Vec<AnswerRecord> = self.answers.iter().flatten().cloned().collect();

        Ok(QuizResult::from_answers(
            self.config.mode(),
            self.config.subject(),
            self.started_at,
            completed_at,
            &self.questions,
            &answers,
        )?)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("remaining", &self.remaining)
            .field("epoch", &self.epoch)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
