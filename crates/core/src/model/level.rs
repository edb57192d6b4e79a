use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelError {
    #[error("level {level} is outside the supported range {min}..={max}", min = Level::MIN, max = Level::MAX)]
    OutOfRange { level: u32 },
}

/// A difficulty tier. Always within `Level::MIN..=Level::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Level(u8);

impl Level {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 5;
    /// Number of supported levels.
    pub const COUNT: usize = 5;

    pub const FIRST: Level = Level(1);
    pub const LAST: Level = Level(5);

    /// # Errors
    ///
    /// Returns `LevelError::OutOfRange` if `level` is not in `1..=5`.
    pub fn new(level: u32) -> Result<Self, LevelError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            // In range, so it fits in a u8.
            Ok(Self(level as u8))
        } else {
            Err(LevelError::OutOfRange { level })
        }
    }

    /// All levels in ascending order.
    pub fn all() -> impl Iterator<Item = Level> {
        (1..=Self::LAST.0).map(Level)
    }

    #[must_use]
    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    /// Zero-based position, for indexing per-level tables.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    #[must_use]
    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// The following level, or `None` from the last one.
    #[must_use]
    pub fn next(self) -> Option<Level> {
        if self.is_last() {
            None
        } else {
            Some(Level(self.0 + 1))
        }
    }
}

impl TryFrom<u32> for Level {
    type Error = LevelError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.get()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
