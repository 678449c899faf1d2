use chrono::{DateTime, Utc};
use std::sync::Arc;

use quiz_core::model::{Leaderboard, LeaderboardEntry, QuizResult};
use quiz_core::time::TimeSource;
use storage::repository::{InMemoryKvRepository, LeaderboardRepository, StorageError};

use crate::error::LeaderboardError;

/// Name recorded when the player never gave one.
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Presentation-facing leaderboard facade that hides repositories and time
/// from the UI.
///
/// Reads that fail degrade to an empty board so a broken store never blocks
/// a session; writes report their failure to the caller, which decides
/// whether that matters.
#[derive(Clone)]
pub struct LeaderboardService {
    clock: Arc<dyn TimeSource>,
    repo: Arc<dyn LeaderboardRepository>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(clock: Arc<dyn TimeSource>, repo: Arc<dyn LeaderboardRepository>) -> Self {
        Self { clock, repo }
    }

    #[must_use]
    pub fn in_memory(clock: Arc<dyn TimeSource>) -> Self {
        Self::new(clock, Arc::new(InMemoryKvRepository::new()))
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Append a finished session to the board and persist the new ranking.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError::Storage` when the rewritten board cannot
    /// be saved; the entry is lost but nothing else is affected.
    pub async fn record(
        &self,
        name: &str,
        result: &QuizResult,
    ) -> Result<LeaderboardEntry, LeaderboardError> {
        let mut board = self.load_board().await;
        let entry = LeaderboardEntry {
            name: name.to_owned(),
            score: result.score(),
            mode: result.mode(),
            subject: result.subject(),
            recorded_at: self.clock.now(),
        };
        board.append(entry.clone());
        self.repo.save_entries(board.entries()).await?;
        Ok(entry)
    }

    /// Current ranking snapshot, best score first.
    ///
    /// A store that has never been written reads as an empty board.
    pub async fn list(&self) -> Vec<LeaderboardEntry> {
        self.load_board().await.into_entries()
    }

    async fn load_board(&self) -> Leaderboard {
        match self.repo.load_entries().await {
            Ok(entries) => Leaderboard::from_entries(entries),
            Err(StorageError::NotFound) => Leaderboard::new(),
            Err(err) => {
                tracing::warn!(error = %err, "leaderboard read failed; starting from an empty board");
                Leaderboard::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::{
        AnswerRecord, MAX_ENTRIES, Question, QuizMode, QuizResult, Subject,
    };
    use quiz_core::time::{fixed_clock, fixed_now};
    use chrono::Duration;

    fn build_result(score: u32) -> QuizResult {
        let total = score.max(1);
        let questions: Vec<Question> = (0..total)
            .map(|n| {
                Question::new(
                    format!("Q{n}"),
                    "right",
                    vec!["right".into(), "wrong".into()],
                )
                .unwrap()
            })
            .collect();
        let answers: Vec<AnswerRecord> = (0..total)
            .map(|n| {
                if n < score {
                    AnswerRecord::answered("right".into(), Duration::seconds(2), true)
                } else {
                    AnswerRecord::answered("wrong".into(), Duration::seconds(2), false)
                }
            })
            .collect();

        QuizResult::from_answers(
            QuizMode::Blitz,
            Subject::History,
            fixed_now(),
            fixed_now() + Duration::seconds(30),
            &questions,
            &answers,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn record_then_list_ranks_by_score() {
        let svc = LeaderboardService::in_memory(fixed_clock());

        svc.record("a", &build_result(2)).await.unwrap();
        svc.record("b", &build_result(8)).await.unwrap();
        svc.record("c", &build_result(5)).await.unwrap();

        let entries = svc.list().await;
        let scores: Vec<u32> = entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![8, 5, 2]);
    }

    #[tokio::test]
    async fn board_never_exceeds_the_cap() {
        let svc = LeaderboardService::in_memory(fixed_clock());

        for i in 0..(MAX_ENTRIES + 10) {
            let score = u32::try_from(i % 9).unwrap();
            svc.record("p", &build_result(score)).await.unwrap();
        }

        assert_eq!(svc.list().await.len(), MAX_ENTRIES);
    }

    #[tokio::test]
    async fn empty_store_lists_an_empty_board() {
        let svc = LeaderboardService::in_memory(fixed_clock());
        assert!(svc.list().await.is_empty());
    }

    /// Store whose reads always fail but whose writes succeed.
    #[derive(Default)]
    struct ReadBrokenRepo {
        saved: std::sync::Mutex<Vec<LeaderboardEntry>>,
    }

    #[async_trait]
    impl LeaderboardRepository for ReadBrokenRepo {
        async fn load_entries(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
            Err(StorageError::Connection("read refused".into()))
        }

        async fn save_entries(&self, entries: &[LeaderboardEntry]) -> Result<(), StorageError> {
            *self.saved.lock().unwrap() = entries.to_vec();
            Ok(())
        }
    }

    #[tokio::test]
    async fn read_failure_degrades_to_an_empty_board() {
        let repo = Arc::new(ReadBrokenRepo::default());
        let reads: Arc<dyn LeaderboardRepository> = repo.clone();
        let svc = LeaderboardService::new(fixed_clock(), reads);

        let entry = svc.record("solo", &build_result(3)).await.unwrap();
        assert_eq!(entry.score, 3);

        let saved = repo.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "solo");
    }

    /// Store that refuses every write.
    struct WriteBrokenRepo;

    #[async_trait]
    impl LeaderboardRepository for WriteBrokenRepo {
        async fn load_entries(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
            Err(StorageError::NotFound)
        }

        async fn save_entries(&self, _entries: &[LeaderboardEntry]) -> Result<(), StorageError> {
            Err(StorageError::Connection("write refused".into()))
        }
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let svc = LeaderboardService::new(fixed_clock(), Arc::new(WriteBrokenRepo));
        let err = svc.record("lost", &build_result(1)).await.unwrap_err();
        assert!(matches!(err, LeaderboardError::Storage(_)));
    }
}
