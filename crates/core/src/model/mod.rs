mod answer;
mod config;
mod leaderboard;
mod question;
mod result;

pub use answer::AnswerRecord;
pub use config::{
    ConfigError, DEFAULT_QUESTION_COUNT, Difficulty, QuizMode, SessionConfig, Subject,
};
pub use leaderboard::{Leaderboard, LeaderboardEntry, MAX_ENTRIES};
pub use question::{Question, QuestionError};
pub use result::{QuestionOutcome, QuizResult, QuizResultError};
