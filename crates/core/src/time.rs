use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Where services read the current time from.
///
/// The session state machine takes timestamps as parameters and never reads
/// a clock itself, so the only consumers are the service layer (stamping
/// session start and completion, dating leaderboard entries) and tests,
/// which substitute a frozen instant to make timing behavior deterministic.
pub trait TimeSource: Send + Sync {
    /// The current time according to this source.
    fn now(&self) -> DateTime<Utc>;
}

/// The process-wide system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A source frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    #[must_use]
    pub fn at(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}

/// Deterministic timestamp for tests and examples (2024-05-01T00:00:00Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_714_521_600;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a shareable source frozen at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Arc<dyn TimeSource> {
    Arc::new(FixedClock::at(fixed_now()))
}
