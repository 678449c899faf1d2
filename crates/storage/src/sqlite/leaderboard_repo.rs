use chrono::Utc;
use quiz_core::model::LeaderboardEntry;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{
    LEADERBOARD_KEY, LeaderboardRepository, StorageError, decode_entries, encode_entries,
};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait::async_trait]
impl LeaderboardRepository for SqliteRepository {
    async fn load_entries(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?1")
            .bind(LEADERBOARD_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .ok_or(StorageError::NotFound)?;

        let raw: String = row.try_get("value").map_err(ser)?;
        decode_entries(&raw)
    }

    async fn save_entries(&self, entries: &[LeaderboardEntry]) -> Result<(), StorageError> {
        let raw = encode_entries(entries)?;

        sqlx::query(
            r"
                INSERT INTO kv (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
            ",
        )
        .bind(LEADERBOARD_KEY)
        .bind(raw)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
