use flag_core::model::Level;

/// How a level playthrough ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Passed; play continues on `next`.
    Advance { next: Level },
    /// Passed the last level.
    AllLevelsComplete,
    /// Below the required score; the level restarts after the retry delay.
    Retry,
}

/// Where a session is in its question loop.
///
/// ```text
/// AwaitingQuestion ──load──▶ QuestionActive ──guess / timeout──▶ AwaitingQuestion
///        │                                                              │
///        └──────────── all questions asked ──▶ LevelComplete ◀──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Between questions: feedback is showing and guesses are ignored.
    AwaitingQuestion,
    /// A flag is shown and its countdown is live.
    QuestionActive,
    /// Terminal for the session.
    LevelComplete(Completion),
}

impl SessionState {
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, SessionState::LevelComplete(_))
    }
}
