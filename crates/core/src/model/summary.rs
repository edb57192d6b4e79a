use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AnswerRecord, Level, Verdict};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// Aggregate result of one finished playthrough of a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSummary {
    level: Level,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    correct: u32,
    incorrect: u32,
    timed_out: u32,
    required_score: u32,
}

impl LevelSummary {
    /// Build a summary from the answers recorded during the playthrough.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn from_answers(
        level: Level,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        answers: &[AnswerRecord],
        required_score: usize,
    ) -> Result<Self, SummaryError> {
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        let mut correct = 0_u32;
        let mut incorrect = 0_u32;
        let mut timed_out = 0_u32;

        for answer in answers {
            match answer.verdict {
                Verdict::Correct => correct = correct.saturating_add(1),
                Verdict::Incorrect => incorrect = incorrect.saturating_add(1),
                Verdict::TimedOut => timed_out = timed_out.saturating_add(1),
            }
        }

        Ok(Self {
            level,
            started_at,
            completed_at,
            correct,
            incorrect,
            timed_out,
            required_score: u32::try_from(required_score).unwrap_or(u32::MAX),
        })
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn timed_out(&self) -> u32 {
        self.timed_out
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect + self.timed_out
    }

    #[must_use]
    pub fn required_score(&self) -> u32 {
        self.required_score
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.correct >= self.required_score
    }
}
