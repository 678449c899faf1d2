use async_trait::async_trait;
use quiz_core::model::LeaderboardEntry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Storage key under which the leaderboard entry list is kept.
pub const LEADERBOARD_KEY: &str = "vast_leaderboard";

/// Persistence contract for the leaderboard.
///
/// The medium is a string-keyed store holding the JSON-serialized entry
/// list under [`LEADERBOARD_KEY`]; the list is read in full and rewritten
/// in full on every append. Ranking and the entry cap are the caller's
/// concern, not the store's.
#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Load all persisted entries, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when nothing has been saved yet,
    /// or other storage errors.
    async fn load_entries(&self) -> Result<Vec<LeaderboardEntry>, StorageError>;

    /// Replace the stored entry list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entries cannot be written.
    async fn save_entries(&self, entries: &[LeaderboardEntry]) -> Result<(), StorageError>;
}

pub(crate) fn encode_entries(entries: &[LeaderboardEntry]) -> Result<String, StorageError> {
    serde_json::to_string(entries).map_err(|e| StorageError::Serialization(e.to_string()))
}

pub(crate) fn decode_entries(raw: &str) -> Result<Vec<LeaderboardEntry>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Simple in-memory string-keyed store for testing and prototyping.
///
/// Goes through the same JSON encoding as the durable backends, so tests
/// exercise the real wire format.
#[derive(Clone, Default)]
pub struct InMemoryKvRepository {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryKvRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryKvRepository {
    async fn load_entries(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let raw = guard.get(LEADERBOARD_KEY).ok_or(StorageError::NotFound)?;
        decode_entries(raw)
    }

    async fn save_entries(&self, entries: &[LeaderboardEntry]) -> Result<(), StorageError> {
        let raw = encode_entries(entries)?;
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(LEADERBOARD_KEY.to_owned(), raw);
        Ok(())
    }
}

/// Aggregates persistence behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub leaderboard: Arc<dyn LeaderboardRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            leaderboard: Arc::new(InMemoryKvRepository::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuizMode, Subject};
    use quiz_core::time::fixed_now;

    fn entry(name: &str, score: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_owned(),
            score,
            mode: QuizMode::Blitz,
            subject: Subject::Geography,
            recorded_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn fresh_store_has_no_entries() {
        let repo = InMemoryKvRepository::new();
        let err = repo.load_entries().await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn save_then_load_round_trips_in_order() {
        let repo = InMemoryKvRepository::new();
        let entries = vec![entry("a", 9), entry("b", 4)];

        repo.save_entries(&entries).await.unwrap();
        let loaded = repo.load_entries().await.unwrap();

        assert_eq!(loaded, entries);
    }

    #[tokio::test]
    async fn save_replaces_the_previous_list() {
        let repo = InMemoryKvRepository::new();
        repo.save_entries(&[entry("old", 1)]).await.unwrap();
        repo.save_entries(&[entry("new", 2), entry("newer", 3)])
            .await
            .unwrap();

        let loaded = repo.load_entries().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "new");
    }
}
