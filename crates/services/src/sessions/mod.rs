mod events;
mod service;
mod state;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use events::{Feedback, LevelIntent, SessionEvent, SubmitOutcome};
pub use service::QuizSession;
pub use state::{Completion, SessionState};
pub use workflow::{Presenter, QuizLoop, RunOutcome, RunReport};
