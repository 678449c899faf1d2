use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("a session needs at least one question")]
    ZeroQuestionCount,

    #[error("per-question time limit must be positive")]
    NonPositiveTimeLimit,

    #[error("post-answer delay cannot be negative")]
    NegativeDelay,
}

//
// ─── SUBJECT ───────────────────────────────────────────────────────────────────
//

/// Question bank categories a session can draw from.
///
/// Each subject maps to a numeric category id in the remote bank's API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    GeneralKnowledge,
    Film,
    Music,
    ScienceNature,
    ScienceComputers,
    Sports,
    Geography,
    History,
    Animals,
}

impl Subject {
    pub const ALL: [Subject; 9] = [
        Subject::GeneralKnowledge,
        Subject::Film,
        Subject::Music,
        Subject::ScienceNature,
        Subject::ScienceComputers,
        Subject::Sports,
        Subject::Geography,
        Subject::History,
        Subject::Animals,
    ];

    /// Category id understood by the remote question bank.
    #[must_use]
    pub fn category_id(self) -> u32 {
        match self {
            Subject::GeneralKnowledge => 9,
            Subject::Film => 11,
            Subject::Music => 12,
            Subject::ScienceNature => 17,
            Subject::ScienceComputers => 18,
            Subject::Sports => 21,
            Subject::Geography => 22,
            Subject::History => 23,
            Subject::Animals => 27,
        }
    }

    /// Human-readable subject name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Subject::GeneralKnowledge => "General Knowledge",
            Subject::Film => "Film",
            Subject::Music => "Music",
            Subject::ScienceNature => "Science & Nature",
            Subject::ScienceComputers => "Science: Computers",
            Subject::Sports => "Sports",
            Subject::Geography => "Geography",
            Subject::History => "History",
            Subject::Animals => "Animals",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Lowercase token the remote question bank expects.
    #[must_use]
    pub fn api_token(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_token())
    }
}

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

/// The two session flavors.
///
/// Modes differ only in per-question time limit, post-answer feedback delay,
/// and whether an explanatory message is shown after each answer. Everything
/// else about a session is mode-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizMode {
    Practice,
    Blitz,
}

impl QuizMode {
    /// Countdown granted per question in this mode.
    #[must_use]
    pub fn default_time_limit(self) -> Duration {
        match self {
            QuizMode::Practice => Duration::seconds(30),
            QuizMode::Blitz => Duration::seconds(10),
        }
    }

    /// How long answer feedback stays on screen before the next question.
    ///
    /// Blitz advances immediately; the delay is not part of the countdown.
    #[must_use]
    pub fn post_answer_delay(self) -> Duration {
        match self {
            QuizMode::Practice => Duration::milliseconds(1500),
            QuizMode::Blitz => Duration::zero(),
        }
    }

    #[must_use]
    pub fn default_difficulty(self) -> Difficulty {
        match self {
            QuizMode::Practice => Difficulty::Easy,
            QuizMode::Blitz => Difficulty::Hard,
        }
    }

    /// Whether the presentation layer shows an explanation after each answer.
    #[must_use]
    pub fn shows_explanation(self) -> bool {
        matches!(self, QuizMode::Practice)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            QuizMode::Practice => "Practice",
            QuizMode::Blitz => "Blitz",
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//
// ─── SESSION CONFIG ────────────────────────────────────────────────────────────
//

/// Questions fetched per session unless overridden.
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

/// Fixed parameters of one quiz session.
///
/// Built from a mode preset, optionally adjusted through the `with_*`
/// methods, and immutable once the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    mode: QuizMode,
    subject: Subject,
    difficulty: Difficulty,
    question_count: u32,
    per_question_time_limit: Duration,
    post_answer_delay: Duration,
}

impl SessionConfig {
    /// Practice preset: easy questions, relaxed countdown, feedback shown.
    #[must_use]
    pub fn practice(subject: Subject) -> Self {
        Self::for_mode(QuizMode::Practice, subject)
    }

    /// Blitz preset: hard questions, short countdown, instant advance.
    #[must_use]
    pub fn blitz(subject: Subject) -> Self {
        Self::for_mode(QuizMode::Blitz, subject)
    }

    #[must_use]
    pub fn for_mode(mode: QuizMode, subject: Subject) -> Self {
        Self {
            mode,
            subject,
            difficulty: mode.default_difficulty(),
            question_count: DEFAULT_QUESTION_COUNT,
            per_question_time_limit: mode.default_time_limit(),
            post_answer_delay: mode.post_answer_delay(),
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Override the number of questions to fetch.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroQuestionCount` for a zero count.
    pub fn with_question_count(mut self, count: u32) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::ZeroQuestionCount);
        }
        self.question_count = count;
        Ok(self)
    }

    /// Override the per-question countdown.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NonPositiveTimeLimit` unless the limit is
    /// strictly positive.
    pub fn with_time_limit(mut self, limit: Duration) -> Result<Self, ConfigError> {
        if limit <= Duration::zero() {
            return Err(ConfigError::NonPositiveTimeLimit);
        }
        self.per_question_time_limit = limit;
        Ok(self)
    }

    /// Override the post-answer feedback delay.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NegativeDelay` for a negative delay.
    pub fn with_post_answer_delay(mut self, delay: Duration) -> Result<Self, ConfigError> {
        if delay < Duration::zero() {
            return Err(ConfigError::NegativeDelay);
        }
        self.post_answer_delay = delay;
        Ok(self)
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
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn per_question_time_limit(&self) -> Duration {
        self.per_question_time_limit
    }

    #[must_use]
    pub fn post_answer_delay(&self) -> Duration {
        self.post_answer_delay
    }
}
