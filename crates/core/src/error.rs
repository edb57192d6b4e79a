use thiserror::Error;

use crate::model::{CountryError, FlagUrlError, LevelError, SettingsError, SummaryError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Country(#[from] CountryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    FlagUrl(#[from] FlagUrlError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
