use chrono::Duration;

/// Outcome recorded for one question.
///
/// `selected == None` means the countdown expired before any choice was
/// made; expiry always scores as incorrect. `time_taken` keeps sub-second
/// precision; [`AnswerRecord::display_seconds`] rounds for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    selected: Option<String>,
    time_taken: Duration,
    is_correct: bool,
}

impl AnswerRecord {
    /// Record a deliberate choice.
    #[must_use]
    pub fn answered(selected: String, time_taken: Duration, is_correct: bool) -> Self {
        Self {
            selected: Some(selected),
            time_taken,
            is_correct,
        }
    }

    /// Record a countdown expiry with no choice made.
    #[must_use]
    pub fn expired(time_taken: Duration) -> Self {
        Self {
            selected: None,
            time_taken,
            is_correct: false,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn time_taken(&self) -> Duration {
        self.time_taken
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.selected.is_none()
    }

    /// Whole seconds for display, rounded to nearest.
    #[must_use]
    pub fn display_seconds(&self) -> i64 {
        let ms = self.time_taken.num_milliseconds();
        (ms + 500).div_euclid(1000)
    }
}
