#![forbid(unsafe_code)]

pub mod agenda;
pub mod error;
pub mod sessions;
pub mod timer;

pub use flag_core::Clock;
pub use sessions as session;

pub use error::SessionError;

pub use sessions::{
    Completion, Feedback, LevelIntent, Presenter, QuizLoop, QuizSession, RunOutcome, RunReport,
    SessionEvent, SessionState, SubmitOutcome,
};
