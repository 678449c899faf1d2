mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::{FeedbackView, QuestionView, SessionSnapshot};
pub use service::{QuizSession, SessionPhase, SubmitOutcome, TickOutcome};
pub use workflow::{QuizAnswerOutcome, QuizLoopService, QuizTickOutcome};
