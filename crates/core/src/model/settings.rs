use std::time::Duration;
use thiserror::Error;

use crate::model::Level;
use crate::pools::POOL_SIZE;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("questions per level must be between 1 and {max}")]
    InvalidQuestionsPerLevel { max: usize },

    #[error("required score ({required}) cannot exceed questions per level ({questions})")]
    RequiredScoreTooHigh { required: usize, questions: usize },

    #[error("timer for level {level} must be > 0 seconds")]
    InvalidTimer { level: Level },
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Rules and pacing for a quiz run.
///
/// Defaults:
/// - 3 questions per level, 2 correct to pass
/// - 15/20/25/30/35 seconds per question for levels 1-5
/// - 700ms of feedback before the next flag, 2200ms before a retry restarts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    questions_per_level: usize,
    required_score: usize,
    level_timers: [u32; Level::COUNT],
    feedback_delay: Duration,
    retry_delay: Duration,
}

impl QuizSettings {
    pub const DEFAULT_LEVEL_TIMERS: [u32; Level::COUNT] = [15, 20, 25, 30, 35];
    pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(700);
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(2_200);

    /// # Errors
    ///
    /// Returns `SettingsError` if the question count is zero or larger than a
    /// pool, if the required score exceeds the question count, or if any
    /// level timer is zero.
    pub fn new(
        questions_per_level: usize,
        required_score: usize,
        level_timers: [u32; Level::COUNT],
    ) -> Result<Self, SettingsError> {
        if questions_per_level == 0 || questions_per_level > POOL_SIZE {
            return Err(SettingsError::InvalidQuestionsPerLevel { max: POOL_SIZE });
        }
        if required_score > questions_per_level {
            return Err(SettingsError::RequiredScoreTooHigh {
                required: required_score,
                questions: questions_per_level,
            });
        }
        if let Some(level) = Level::all().find(|level| level_timers[level.index()] == 0) {
            return Err(SettingsError::InvalidTimer { level });
        }

        Ok(Self {
            questions_per_level,
            required_score,
            level_timers,
            feedback_delay: Self::DEFAULT_FEEDBACK_DELAY,
            retry_delay: Self::DEFAULT_RETRY_DELAY,
        })
    }

    #[must_use]
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    #[must_use]
    pub fn questions_per_level(&self) -> usize {
        self.questions_per_level
    }

    #[must_use]
    pub fn required_score(&self) -> usize {
        self.required_score
    }

    /// Seconds allowed per question on `level`.
    #[must_use]
    pub fn timer_seconds(&self, level: Level) -> u32 {
        self.level_timers[level.index()]
    }

    #[must_use]
    pub fn feedback_delay(&self) -> Duration {
        self.feedback_delay
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            questions_per_level: 3,
            required_score: 2,
            level_timers: Self::DEFAULT_LEVEL_TIMERS,
            feedback_delay: Self::DEFAULT_FEEDBACK_DELAY,
            retry_delay: Self::DEFAULT_RETRY_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_three_questions_two_required() {
        let settings = QuizSettings::default();
        assert_eq!(settings.questions_per_level(), 3);
        assert_eq!(settings.required_score(), 2);
        for (level, secs) in Level::all().zip([15, 20, 25, 30, 35]) {
            assert_eq!(settings.timer_seconds(level), secs);
        }
        assert_eq!(settings.feedback_delay(), Duration::from_millis(700));
        assert_eq!(settings.retry_delay(), Duration::from_millis(2_200));
    }

    #[test]
    fn new_validates_counts() {
        assert_eq!(
            QuizSettings::new(0, 0, QuizSettings::DEFAULT_LEVEL_TIMERS),
            Err(SettingsError::InvalidQuestionsPerLevel { max: POOL_SIZE })
        );
        assert_eq!(
            QuizSettings::new(POOL_SIZE + 1, 1, QuizSettings::DEFAULT_LEVEL_TIMERS),
            Err(SettingsError::InvalidQuestionsPerLevel { max: POOL_SIZE })
        );
        assert_eq!(
            QuizSettings::new(3, 4, QuizSettings::DEFAULT_LEVEL_TIMERS),
            Err(SettingsError::RequiredScoreTooHigh {
                required: 4,
                questions: 3
            })
        );
    }

    #[test]
    fn new_rejects_zero_timer() {
        let err = QuizSettings::new(3, 2, [15, 20, 0, 30, 35]).unwrap_err();
        assert_eq!(
            err,
            SettingsError::InvalidTimer {
                level: Level::new(3).unwrap()
            }
        );
    }

    #[test]
    fn delays_are_overridable() {
        let settings = QuizSettings::default()
            .with_feedback_delay(Duration::ZERO)
            .with_retry_delay(Duration::from_secs(5));
        assert_eq!(settings.feedback_delay(), Duration::ZERO);
        assert_eq!(settings.retry_delay(), Duration::from_secs(5));
    }
}
