//! String sanitization steps
//!
//! Single-purpose steps that the display sanitizer chains together. Each one
//! is usable on its own.

use super::SanitizeResult;
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Characters that only appear in display text as residue of JSON structures
pub const STRUCTURAL_CHARS: [char; 4] = ['{', '}', '[', ']'];

/// Markdown bold/italic marker
pub const EMPHASIS_MARKER: char = '*';

lazy_static! {
    static ref CONTROL_CHARS_REGEX: Regex =
        Regex::new(r"[\x00-\x08\x0E-\x1F\x7F]").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Remove control characters from a string
///
/// Whitespace controls (tab, newline, vertical tab, form feed, carriage return)
/// are kept so that whitespace collapsing turns them into spaces.
pub fn remove_control_chars(input: &str) -> SanitizeResult<String> {
    let sanitized = CONTROL_CHARS_REGEX.replace_all(input, "").to_string();

    if sanitized == input {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(sanitized, Some("Removed control characters".to_string()))
    }
}

/// Normalize Unicode text (NFC form)
pub fn normalize_unicode(input: &str) -> SanitizeResult<String> {
    let normalized = input.nfc().collect::<String>();

    if normalized == input {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(
            normalized,
            Some("Normalized Unicode characters".to_string()),
        )
    }
}

/// Trim whitespace from beginning and end
pub fn trim_whitespace(input: &str) -> SanitizeResult<String> {
    let trimmed = input.trim();

    if trimmed.len() == input.len() {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(trimmed.to_string(), Some("Trimmed whitespace".to_string()))
    }
}

/// Collapse multiple whitespace characters into a single space
pub fn collapse_whitespace(input: &str) -> SanitizeResult<String> {
    let result = WHITESPACE_REGEX.replace_all(input, " ").to_string();

    if result == input {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(result, Some("Collapsed whitespace".to_string()))
    }
}

/// Remove any characters for which the predicate holds
pub fn remove_chars_where<P>(input: &str, predicate: P, details: &str) -> SanitizeResult<String>
where
    P: Fn(char) -> bool,
{
    let result: String = input.chars().filter(|c| !predicate(*c)).collect();

    if result.len() == input.len() {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(result, Some(details.to_string()))
    }
}

/// Remove braces and brackets left over from JSON structures
pub fn strip_structural_chars(input: &str) -> SanitizeResult<String> {
    remove_chars_where(
        input,
        |c| STRUCTURAL_CHARS.contains(&c),
        "Removed structural characters",
    )
}

/// Remove markdown bold/italic asterisks
pub fn strip_markdown_emphasis(input: &str) -> SanitizeResult<String> {
    remove_chars_where(
        input,
        |c| c == EMPHASIS_MARKER,
        "Removed markdown emphasis",
    )
}

/// Returns true if the text contains any brace or bracket
pub fn has_structural_chars(input: &str) -> bool {
    input.contains(&STRUCTURAL_CHARS[..])
}
