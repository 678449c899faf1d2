use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::model::{QuizMode, Subject};

/// Maximum number of entries the board retains.
pub const MAX_ENTRIES: usize = 50;

/// One finished session on the board. Appended, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub mode: QuizMode,
    pub subject: Subject,
    pub recorded_at: DateTime<Utc>,
}

/// Ranked, capped collection of past session scores.
///
/// Ordering is descending by score; entries with equal scores keep their
/// insertion order, so earlier results rank first among ties. Anything past
/// [`MAX_ENTRIES`] is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a board from persisted entries, normalizing order and cap.
    #[must_use]
    pub fn from_entries(entries: Vec<LeaderboardEntry>) -> Self {
        let mut board = Self { entries };
        board.normalize();
        board
    }

    /// Insert an entry, re-rank, and enforce the cap.
    pub fn append(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
        self.normalize();
    }

    fn normalize(&mut self) {
        self.entries.sort_by_key(|e| Reverse(e.score));
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Current ranking, best score first.
    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<LeaderboardEntry> {
        self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn entry(name: &str, score: u32, offset_secs: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_owned(),
            score,
            mode: QuizMode::Blitz,
            subject: Subject::GeneralKnowledge,
            recorded_at: fixed_now() + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn appends_keep_descending_score_order() {
        let mut board = Leaderboard::new();
        board.append(entry("a", 3, 0));
        board.append(entry("b", 9, 1));
        board.append(entry("c", 5, 2));

        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 5, 3]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut board = Leaderboard::new();
        board.append(entry("first", 7, 0));
        board.append(entry("second", 7, 1));
        board.append(entry("third", 7, 2));

        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn cap_holds_after_any_append_sequence() {
        let mut board = Leaderboard::new();
        for i in 0..120 {
            board.append(entry("p", i % 11, i64::from(i)));
        }

        assert_eq!(board.len(), MAX_ENTRIES);
        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        let mut sorted = scores.clone();
        sorted.sort_unstable_by_key(|s| Reverse(*s));
        assert_eq!(scores, sorted);
    }

    #[test]
    fn from_entries_normalizes_persisted_data() {
        let raw = vec![entry("low", 1, 0), entry("high", 10, 1), entry("mid", 5, 2)];
        let board = Leaderboard::from_entries(raw);

        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![10, 5, 1]);
    }

    #[test]
    fn entry_serde_round_trip() {
        let original = entry("Anonymous", 8, 0);
        let json = serde_json::to_string(&original).unwrap();
        let back: LeaderboardEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
