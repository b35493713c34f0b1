//! Display-worthiness checks
//!
//! Independent of the sanitizer: text is re-checked for structural characters
//! even if it already went through [`crate::sanitizers::sanitize_text`].

use super::run_validators;
use crate::errors::{DigestError, DigestResult};
use crate::sanitizers::STRUCTURAL_CHARS;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// ASCII letters and digits plus the accented Latin-1 and Latin Extended-A letters
    static ref ALPHANUMERIC_REGEX: Regex =
        Regex::new(r"[A-Za-z0-9À-ÖØ-öø-ÿĀ-ſ]").unwrap();
}

/// Returns true if the text has at least one letter or digit, accented Latin included
pub fn has_alphanumeric(text: &str) -> bool {
    ALPHANUMERIC_REGEX.is_match(text)
}

/// Validate that text is long enough to be worth showing
pub fn min_display_length(text: &str, min: usize) -> DigestResult<()> {
    let length = text.chars().count();
    if text.is_empty() || length < min {
        Err(DigestError::TooShort(format!(
            "Text length ({}) is less than minimum display length ({})",
            length, min
        )))
    } else {
        Ok(())
    }
}

/// Validate that no brace or bracket survived sanitization
pub fn no_structural_chars(text: &str) -> DigestResult<()> {
    match text.chars().find(|c| STRUCTURAL_CHARS.contains(c)) {
        Some(c) => Err(DigestError::InvalidCharacters(format!(
            "Text contains structural character: '{}'",
            c
        ))),
        None => Ok(()),
    }
}

/// Validate text for display, reporting every reason it is rejected
pub fn validate_for_display(text: &str, min_length: usize) -> DigestResult<()> {
    let checks: Vec<Box<dyn Fn(&str) -> DigestResult<()>>> = vec![
        Box::new(move |t: &str| min_display_length(t, min_length)),
        Box::new(no_structural_chars),
    ];

    run_validators(text, checks)
}

/// Returns false for empty text, text shorter than `min_length` characters,
/// or text that still contains `{`, `}`, `[` or `]`
pub fn is_valid_for_display(text: &str, min_length: usize) -> bool {
    validate_for_display(text, min_length).is_ok()
}
