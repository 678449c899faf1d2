#![forbid(unsafe_code)]

pub mod error;
pub mod leaderboard_service;
pub mod question_source;
pub mod sessions;

pub use quiz_core::time::{SystemClock, TimeSource};
pub use sessions as session;

pub use error::{LeaderboardError, SessionError, SourceError};
pub use leaderboard_service::{DEFAULT_PLAYER_NAME, LeaderboardService};
pub use question_source::{OpenTriviaSource, QuestionSource, TriviaConfig};

pub use sessions::{
    FeedbackView, QuestionView, QuizAnswerOutcome, QuizLoopService, QuizSession, QuizTickOutcome,
    SessionPhase, SessionSnapshot, SubmitOutcome, TickOutcome,
};
