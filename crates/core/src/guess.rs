//! Free-text answer matching.
//!
//! A guess matches when it equals the answer after trimming surrounding
//! whitespace and lowercasing both sides. Accents and alternate spellings
//! ("USA" for "United States") are not folded.

/// Canonical form used for comparison.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[must_use]
pub fn is_correct(submitted: &str, answer: &str) -> bool {
    normalize(submitted) == normalize(answer)
}
