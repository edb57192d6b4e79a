mod answer;
mod country;
mod level;
mod settings;
mod summary;

pub use answer::{AnswerRecord, Verdict};
pub use country::{
    Country, CountryError, DEFAULT_FLAG_BASE_URL, FlagImageSource, FlagUrlError, RegionCode,
};
pub use level::{Level, LevelError};
pub use settings::{QuizSettings, SettingsError};
pub use summary::{LevelSummary, SummaryError};
