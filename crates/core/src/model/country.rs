use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

/// Default flag host; images live at `<base><code>.png`.
pub const DEFAULT_FLAG_BASE_URL: &str = "https://flagcdn.com/w320/";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CountryError {
    #[error("country name cannot be empty")]
    EmptyName,

    #[error("region code must be two ASCII letters, got {raw:?}")]
    InvalidRegionCode { raw: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlagUrlError {
    #[error("invalid flag base url {raw:?}: {source}")]
    InvalidBase {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    #[error("flag base url cannot have paths joined onto it: {raw}")]
    NotABase { raw: String },

    #[error("cannot build flag url for {code}: {source}")]
    Join {
        code: String,
        #[source]
        source: url::ParseError,
    },
}

//
// ─── REGION CODE ───────────────────────────────────────────────────────────────
//

/// Two-letter lowercase identifier of a country's flag asset (`"fr"`, `"jp"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionCode(String);

impl RegionCode {
    /// Parses a region code, accepting either case.
    ///
    /// # Errors
    ///
    /// Returns `CountryError::InvalidRegionCode` unless the trimmed input is
    /// exactly two ASCII letters.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, CountryError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.len() != 2 || !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(CountryError::InvalidRegionCode {
                raw: raw.as_ref().to_string(),
            });
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── COUNTRY ───────────────────────────────────────────────────────────────────
//

/// A quiz answer: the canonical country name and the code of its flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    name: String,
    region_code: RegionCode,
}

impl Country {
    /// # Errors
    ///
    /// Returns `CountryError::EmptyName` for a blank name and
    /// `CountryError::InvalidRegionCode` for a malformed code.
    pub fn new(name: impl Into<String>, region_code: &str) -> Result<Self, CountryError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CountryError::EmptyName);
        }
        Ok(Self {
            name,
            region_code: RegionCode::parse(region_code)?,
        })
    }

    /// Builds a country from the static pool table, which is checked by tests.
    pub(crate) fn from_table(name: &str, region_code: &str) -> Self {
        Self {
            name: name.to_string(),
            region_code: RegionCode(region_code.to_string()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn region_code(&self) -> &RegionCode {
        &self.region_code
    }
}

//
// ─── FLAG IMAGES ───────────────────────────────────────────────────────────────
//

/// Resolves region codes to flag image URLs under a configurable base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagImageSource {
    base: Url,
}

impl FlagImageSource {
    /// # Errors
    ///
    /// Returns `FlagUrlError` if `base` does not parse or cannot carry a path.
    pub fn new(base: impl AsRef<str>) -> Result<Self, FlagUrlError> {
        let raw = base.as_ref().trim();
        // Without a trailing slash `join` would replace the last segment.
        let with_slash = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };
        let base = Url::parse(&with_slash).map_err(|source| FlagUrlError::InvalidBase {
            raw: raw.to_string(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(FlagUrlError::NotABase {
                raw: raw.to_string(),
            });
        }
        Ok(Self { base })
    }

    /// # Errors
    ///
    /// Returns `FlagUrlError::Join` if the image path cannot be joined.
    pub fn url_for(&self, code: &RegionCode) -> Result<Url, FlagUrlError> {
        self.base
            .join(&format!("{code}.png"))
            .map_err(|source| FlagUrlError::Join {
                code: code.to_string(),
                source,
            })
    }
}
