use std::fmt;

use flag_core::model::{AnswerRecord, Country, Level, LevelSummary};

use super::state::Completion;

/// Message shown under the flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    Cleared,
    Correct,
    /// Wrong guess or timeout; carries the expected answer.
    Incorrect { answer: String },
    AllLevelsComplete,
    Retry { required: usize, total: usize },
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Cleared => Ok(()),
            Feedback::Correct => f.write_str("✅ Correct!"),
            Feedback::Incorrect { answer } => write!(f, "❌ {answer}"),
            Feedback::AllLevelsComplete => f.write_str("🏆 You completed ALL levels!"),
            Feedback::Retry { required, total } => {
                write!(f, "Retry level ({required}/{total} required)")
            }
        }
    }
}

/// Navigation the session asks its host to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelIntent {
    NavigateTo(Level),
    AllLevelsComplete,
    /// Start a fresh session at this level.
    RestartLevel(Level),
}

/// Output of a session, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    QuestionLoaded {
        level: Level,
        index: usize,
        total: usize,
        country: Country,
    },
    /// Whole seconds left on the current question.
    Countdown { remaining: u32 },
    Answered { record: AnswerRecord, score: usize },
    Feedback(Feedback),
    LevelCompleted {
        summary: LevelSummary,
        completion: Completion,
    },
    Intent(LevelIntent),
}

/// What happened to a submitted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Recorded(AnswerRecord),
    /// No question was active; nothing changed.
    Ignored,
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, SubmitOutcome::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_messages() {
        assert_eq!(Feedback::Cleared.to_string(), "");
        assert_eq!(Feedback::Correct.to_string(), "✅ Correct!");
        assert_eq!(
            Feedback::Incorrect {
                answer: "Japan".into()
            }
            .to_string(),
            "❌ Japan"
        );
        assert_eq!(
            Feedback::Retry {
                required: 2,
                total: 3
            }
            .to_string(),
            "Retry level (2/3 required)"
        );
    }
}
