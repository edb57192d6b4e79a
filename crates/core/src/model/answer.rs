use serde::{Deserialize, Serialize};

use crate::model::Country;

/// How a single question ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The countdown ran out before any guess arrived.
    TimedOut,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Record of one answered (or expired) question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub country: Country,
    pub guess: Option<String>,
    pub verdict: Verdict,
}

impl AnswerRecord {
    #[must_use]
    pub fn guessed(country: Country, guess: impl Into<String>, correct: bool) -> Self {
        Self {
            country,
            guess: Some(guess.into()),
            verdict: if correct {
                Verdict::Correct
            } else {
                Verdict::Incorrect
            },
        }
    }

    #[must_use]
    pub fn timed_out(country: Country) -> Self {
        Self {
            country,
            guess: None,
            verdict: Verdict::TimedOut,
        }
    }
}
