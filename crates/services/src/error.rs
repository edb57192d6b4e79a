//! Shared error types for the services crate.

use thiserror::Error;

use flag_core::model::{LevelError, SummaryError};

/// Errors emitted by quiz sessions and the run loop.
///
/// Wrong guesses, timeouts and guesses outside an active question are normal
/// play and never surface here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    InvalidLevel(#[from] LevelError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
