//! Display text sanitizer
//!
//! Field values coming out of the analysis store are frequently JSON-encoded
//! more than once (a string holding the quoted form of another string), or are
//! whole JSON documents that were stored in a text column. This sanitizer
//! unwraps quoted strings, refuses structured documents outright, and cleans
//! the remaining plain text for display.
//!
//! Text is put in NFC form so a decomposed accent compares and counts the same
//! as its precomposed character in the length checks that follow.

use super::emoji::strip_emoji;
use super::string::{
    collapse_whitespace, normalize_unicode, remove_control_chars, strip_markdown_emphasis,
    strip_structural_chars, trim_whitespace,
};
use super::{chain_sanitizers, SanitizeResult};
use crate::MAX_UNWRAP_DEPTH;
use serde_json::Value;

/// What a piece of text turned out to be when read as JSON
#[derive(Debug, Clone, PartialEq)]
enum JsonText {
    /// A JSON string literal; holds the decoded inner text
    Quoted(String),
    /// An object, array or `null`
    Structured,
    /// Not JSON, or a bare number/boolean
    Plain,
}

fn classify(text: &str) -> JsonText {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::String(inner)) => JsonText::Quoted(inner),
        Ok(Value::Object(_)) | Ok(Value::Array(_)) | Ok(Value::Null) => JsonText::Structured,
        Ok(Value::Number(_)) | Ok(Value::Bool(_)) | Err(_) => JsonText::Plain,
    }
}

/// Sanitize an arbitrary JSON value for display
///
/// Strings are sanitized as text, `null` yields an empty string, and any other
/// value is sanitized through its JSON text form (so objects and arrays come
/// back empty).
pub fn sanitize_value(input: &Value) -> SanitizeResult<String> {
    match input {
        Value::Null => SanitizeResult::unmodified(String::new()),
        Value::String(s) => sanitize_text(s),
        other => sanitize_text(&other.to_string()),
    }
}

/// Sanitize a text field for display
///
/// The result never contains `{`, `}`, `[` or `]`. JSON string literals are
/// unwrapped up to [`MAX_UNWRAP_DEPTH`] times; past that the text reached so
/// far is cleaned and returned as is.
pub fn sanitize_text(input: &str) -> SanitizeResult<String> {
    if input.is_empty() {
        return SanitizeResult::unmodified(String::new());
    }

    let mut current = input.to_string();
    let mut layers = 0;

    loop {
        match classify(&current) {
            JsonText::Quoted(inner) => {
                if layers == MAX_UNWRAP_DEPTH {
                    log::debug!(
                        "Stopped unwrapping JSON string after {} layers",
                        MAX_UNWRAP_DEPTH
                    );
                    break;
                }
                current = inner;
                layers += 1;
            }
            JsonText::Structured => {
                return SanitizeResult::modified(
                    String::new(),
                    Some("Discarded structured JSON".to_string()),
                );
            }
            JsonText::Plain => break,
        }
    }

    let cleaned = clean_plain_text(current);

    if layers == 0 {
        return cleaned;
    }

    let unwrapped = format!("Unwrapped {} JSON string layer(s)", layers);
    let details = match cleaned.details {
        Some(details) => format!("{}; {}", unwrapped, details),
        None => unwrapped,
    };
    SanitizeResult::modified(cleaned.sanitized, Some(details))
}

/// Sanitize and keep only the text
pub fn sanitize_for_display(input: &str) -> String {
    sanitize_text(input).into_inner()
}

/// Plain-text cleanup: structural characters, markdown emphasis, emoji, whitespace
pub fn clean_plain_text(input: String) -> SanitizeResult<String> {
    let sanitizers: Vec<Box<dyn Fn(String) -> SanitizeResult<String>>> = vec![
        Box::new(|s| remove_control_chars(&s)),
        Box::new(|s| normalize_unicode(&s)),
        Box::new(|s| strip_structural_chars(&s)),
        Box::new(|s| strip_markdown_emphasis(&s)),
        Box::new(|s| strip_emoji(&s)),
        Box::new(|s| collapse_whitespace(&s)),
        Box::new(|s| trim_whitespace(&s)),
    ];

    chain_sanitizers(input, sanitizers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_empty_input() {
        let result = sanitize_text("");
        assert!(!result.was_modified);
        assert_eq!(result.sanitized, "");
        assert_eq!(sanitize_value(&Value::Null).sanitized, "");
    }

    #[test]
    fn test_quoted_string_is_unwrapped() {
        let result = sanitize_text("\"hello\"");
        assert!(result.was_modified);
        assert_eq!(result.sanitized, "hello");
        assert!(result.details.unwrap_or_default().starts_with("Unwrapped 1"));
    }

    #[test]
    fn test_double_encoded_string_is_unwrapped() {
        let once = serde_json::to_string("**Praias** em alta 🔥").unwrap();
        let twice = serde_json::to_string(&once).unwrap();

        assert_eq!(sanitize_for_display(&twice), "Praias em alta");
    }

    #[test_case("{\"insight\": \"texto\"}" ; "object")]
    #[test_case("[\"a\", \"b\"]" ; "array")]
    #[test_case("  [ ]  " ; "padded empty array")]
    #[test_case("null" ; "null literal")]
    #[test_case("\"{\\\"a\\\": 1}\"" ; "quoted object")]
    fn test_structured_json_is_discarded(input: &str) {
        assert_eq!(sanitize_for_display(input), "");
    }

    #[test_case("42", "42" ; "number")]
    #[test_case("true", "true" ; "boolean")]
    #[test_case("{nao e json}", "nao e json" ; "broken object")]
    #[test_case("Lista [rascunho]: *item*", "Lista rascunho: item" ; "markdown and brackets")]
    #[test_case("  Alta\n\n procura\t no  Nordeste ", "Alta procura no Nordeste" ; "whitespace")]
    #[test_case("🚀 Crescimento de 12% ✅", "Crescimento de 12%" ; "emoji")]
    #[test_case("Alta\u{000B}procura\u{000C}no Nordeste", "Alta procura no Nordeste" ; "vertical tab and form feed")]
    #[test_case("Preço me\u{0301}dio em alta", "Preço médio em alta" ; "combining accent composed")]
    fn test_plain_text_cleanup(input: &str, expected: &str) {
        assert_eq!(sanitize_for_display(input), expected);
    }

    #[test]
    fn test_unwrap_depth_is_bounded() {
        let mut nested = serde_json::to_string("fundo").unwrap();
        for _ in 0..(MAX_UNWRAP_DEPTH + 3) {
            nested = serde_json::to_string(&nested).unwrap();
        }

        let result = sanitize_for_display(&nested);
        assert!(!result.is_empty());
        assert!(result.contains("fundo"));
        assert!(!result.contains('{') && !result.contains('['));
    }

    #[test]
    fn test_sanitize_value() {
        assert_eq!(sanitize_value(&json!("\"Nordeste\"")).sanitized, "Nordeste");
        assert_eq!(sanitize_value(&json!({"a": 1})).sanitized, "");
        assert_eq!(sanitize_value(&json!([1, 2])).sanitized, "");
        assert_eq!(sanitize_value(&json!(12.5)).sanitized, "12.5");
        assert_eq!(sanitize_value(&json!(false)).sanitized, "false");
    }
}
