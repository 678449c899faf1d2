//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, QuizResultError};
use storage::repository::StorageError;

/// Errors emitted while fetching questions from the remote bank.
///
/// All variants leave the caller in a restartable state; retrying the fetch
/// is always safe.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("question bank request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("question bank rejected the request (response_code {0})")]
    Rejected(u8),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Malformed(#[from] QuestionError),
}

/// Errors emitted by session operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,

    #[error("session has not started yet")]
    NotStarted,

    #[error("session already has its questions")]
    AlreadyStarted,

    #[error("session already completed")]
    Completed,

    #[error("session is still in progress")]
    Incomplete,

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Result(#[from] QuizResultError),
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
