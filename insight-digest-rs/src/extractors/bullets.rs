//! Insight bullet extraction
//!
//! Turns free-form analysis prose into a few short, scannable bullets. This is
//! a best-effort fallback for records without structured analysis fields: it
//! filters by length rather than attempting real sentence segmentation.
//!
//! Fragments are split on newlines, on `•`, and on any `-` or `*` followed by
//! whitespace, even in the middle of a sentence. Prose such as "alta - mas
//! instável" is therefore split in two.

use crate::record::AnalysisRecord;
use crate::validators::has_alphanumeric;
use crate::{BULLET_ELLIPSIS, MAX_BULLET_LENGTH, MIN_FRAGMENT_LENGTH};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Characters stripped from the start of a fragment
pub const LIST_MARKERS: [char; 3] = ['-', '*', '•'];

lazy_static! {
    static ref FRAGMENT_SPLIT_REGEX: Regex = Regex::new(r"\r?\n|•|[-*]\s").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
    static ref LEADING_ASTERISKS_REGEX: Regex = Regex::new(r"^\*+\s*").unwrap();
}

/// Extract up to `max` bullets from a record's insights and raw AI response
pub fn extract_bullets(record: &AnalysisRecord, max: usize) -> Vec<String> {
    let raw_response = record.raw_response_text();
    let working = format!("{}\n{}", record.insights_text(), raw_response);
    extract_bullets_from_text(&working, max)
}

/// Extract up to `max` bullets from free-form text
pub fn extract_bullets_from_text(text: &str, max: usize) -> Vec<String> {
    if max == 0 {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut bullets = Vec::new();

    for candidate in candidate_bullets(text) {
        if seen.insert(candidate.to_lowercase()) {
            bullets.push(candidate);
            if bullets.len() == max {
                break;
            }
        }
    }

    log::debug!("Extracted {} bullet(s) (max {})", bullets.len(), max);
    bullets
}

/// Every fragment that survives filtering, before deduplication, in text order
pub fn candidate_bullets(text: &str) -> impl Iterator<Item = String> + '_ {
    FRAGMENT_SPLIT_REGEX
        .split(text)
        .map(strip_list_marker)
        .filter(|fragment| is_candidate(fragment))
        .map(normalize_fragment)
        .map(truncate_bullet)
        .filter(|bullet| has_alphanumeric(bullet))
}

fn strip_list_marker(fragment: &str) -> &str {
    fragment
        .trim_start_matches(|c: char| LIST_MARKERS.contains(&c) || c.is_whitespace())
        .trim_end()
}

fn is_candidate(fragment: &str) -> bool {
    !fragment.is_empty()
        && fragment.chars().count() >= MIN_FRAGMENT_LENGTH
        && has_alphanumeric(fragment)
}

fn normalize_fragment(fragment: &str) -> String {
    let collapsed = WHITESPACE_REGEX.replace_all(fragment, " ");
    LEADING_ASTERISKS_REGEX.replace(&collapsed, "").into_owned()
}

/// Shorten text longer than the bullet limit, ending it with an ellipsis
pub fn truncate_bullet(text: String) -> String {
    if text.chars().count() <= MAX_BULLET_LENGTH {
        return text;
    }

    let keep = MAX_BULLET_LENGTH - BULLET_ELLIPSIS.chars().count();
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(BULLET_ELLIPSIS);
    truncated
}
