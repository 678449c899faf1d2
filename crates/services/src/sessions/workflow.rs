use chrono::Duration;
use std::sync::Arc;

use quiz_core::model::{QuizResult, SessionConfig};
use quiz_core::time::TimeSource;
use storage::repository::LeaderboardRepository;

use super::service::{QuizSession, SubmitOutcome, TickOutcome};
use crate::error::SessionError;
use crate::leaderboard_service::{DEFAULT_PLAYER_NAME, LeaderboardService};
use crate::question_source::QuestionSource;

/// Result of answering the current question through the loop service.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAnswerOutcome {
    pub outcome: SubmitOutcome,
    pub is_complete: bool,
    /// Present on the call that completed the session.
    pub result: Option<QuizResult>,
}

/// Result of forwarding a countdown tick through the loop service.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizTickOutcome {
    pub outcome: TickOutcome,
    pub is_complete: bool,
    /// Present on the tick that completed the session.
    pub result: Option<QuizResult>,
}

/// Orchestrates question fetch, session transitions, and leaderboard
/// persistence. This is the surface the presentation layer drives.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Arc<dyn TimeSource>,
    source: Arc<dyn QuestionSource>,
    leaderboard: LeaderboardService,
    player_name: String,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Arc<dyn TimeSource>,
        source: Arc<dyn QuestionSource>,
        leaderboard_repo: Arc<dyn LeaderboardRepository>,
    ) -> Self {
        Self {
            leaderboard: LeaderboardService::new(Arc::clone(&clock), leaderboard_repo),
            clock,
            source,
            player_name: DEFAULT_PLAYER_NAME.to_owned(),
        }
    }

    /// Name recorded on leaderboard entries for this player.
    #[must_use]
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    #[must_use]
    pub fn leaderboard(&self) -> &LeaderboardService {
        &self.leaderboard
    }

    /// Start a new session for the given config.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Source` when the fetch fails and
    /// `SessionError::Empty` for an empty batch; either way no partial
    /// session is handed out and calling again is safe.
    pub async fn start_session(&self, config: SessionConfig) -> Result<QuizSession, SessionError> {
        let questions = self
            .source
            .fetch_questions(config.subject(), config.difficulty(), config.question_count())
            .await?;
        QuizSession::start(config, questions, self.clock.now())
    }

    /// Answer the current question; finalizes the session when this was the
    /// last one.
    ///
    /// # Errors
    ///
    /// Propagates phase errors from the session (also logged, since correct
    /// event sequencing should make them unreachable).
    pub async fn answer_current(
        &self,
        session: &mut QuizSession,
        selected: &str,
    ) -> Result<QuizAnswerOutcome, SessionError> {
        let was_complete = session.is_complete();
        let outcome = match session.submit_answer(selected, self.clock.now()) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(error = %err, "submission outside its valid phase");
                return Err(err);
            }
        };

        let result = self.finalize(session, was_complete).await?;
        Ok(QuizAnswerOutcome {
            outcome,
            is_complete: session.is_complete(),
            result,
        })
    }

    /// Forward a countdown tick; expiry finalizes exactly as a manual
    /// answer would.
    ///
    /// # Errors
    ///
    /// Returns an error only if aggregating the completed session fails.
    pub async fn tick(
        &self,
        session: &mut QuizSession,
        epoch: u64,
        delta: Duration,
    ) -> Result<QuizTickOutcome, SessionError> {
        let was_complete = session.is_complete();
        let outcome = session.tick(epoch, delta, self.clock.now());

        let result = self.finalize(session, was_complete).await?;
        Ok(QuizTickOutcome {
            outcome,
            is_complete: session.is_complete(),
            result,
        })
    }

    /// On the transition that completed the session, aggregate the result
    /// and append it to the leaderboard. A persistence failure is logged
    /// and swallowed: scoring never depends on the board being writable.
    async fn finalize(
        &self,
        session: &QuizSession,
        was_complete: bool,
    ) -> Result<Option<QuizResult>, SessionError> {
        if was_complete || !session.is_complete() {
            return Ok(None);
        }

        let result = session.result()?;
        if let Err(err) = self.leaderboard.record(&self.player_name, &result).await {
            tracing::warn!(error = %err, "session result not saved to leaderboard");
        }
        Ok(Some(result))
    }
}
