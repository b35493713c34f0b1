//! Display text sanitization
//!
//! Sanitizers turn arbitrary field values (JSON-encoded strings, markdown,
//! emoji-decorated AI output) into plain display text. Each step reports
//! whether it changed anything so callers can log or audit the pipeline.

pub mod display;
pub mod emoji;
pub mod string;

pub use display::*;
pub use emoji::*;
pub use string::*;

/// Sanitization result containing the sanitized content and information
/// about whether changes were made during sanitization
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizeResult<T> {
    /// Sanitized content
    pub sanitized: T,
    /// Whether any changes were made during sanitization
    pub was_modified: bool,
    /// Optional details about what was modified
    pub details: Option<String>,
}

impl<T> SanitizeResult<T> {
    /// Create a result with unmodified content
    pub fn unmodified(content: T) -> Self {
        Self {
            sanitized: content,
            was_modified: false,
            details: None,
        }
    }

    /// Create a result with modified content
    pub fn modified(content: T, details: Option<String>) -> Self {
        Self {
            sanitized: content,
            was_modified: true,
            details,
        }
    }

    /// Consume the result, keeping only the sanitized content
    pub fn into_inner(self) -> T {
        self.sanitized
    }
}

/// Run multiple sanitizers in sequence
pub fn chain_sanitizers<T, F>(input: T, sanitizers: Vec<F>) -> SanitizeResult<T>
where
    F: Fn(T) -> SanitizeResult<T>,
{
    let mut result = SanitizeResult::unmodified(input);
    let mut all_details = Vec::new();

    for sanitizer in sanitizers {
        let current_result = sanitizer(result.sanitized);

        result.sanitized = current_result.sanitized;

        if current_result.was_modified {
            result.was_modified = true;
            if let Some(details) = current_result.details {
                all_details.push(details);
            }
        }
    }

    if !all_details.is_empty() {
        result.details = Some(all_details.join("; "));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_result() {
        let unmodified = SanitizeResult::unmodified("test");
        assert!(!unmodified.was_modified);
        assert_eq!(unmodified.sanitized, "test");
        assert_eq!(unmodified.details, None);

        let modified = SanitizeResult::modified("tést", Some("normalized".to_string()));
        assert!(modified.was_modified);
        assert_eq!(modified.details.as_deref(), Some("normalized"));
        assert_eq!(modified.into_inner(), "tést");
    }

    #[test]
    fn test_chain_sanitizers() {
        let sanitizers: Vec<Box<dyn Fn(String) -> SanitizeResult<String>>> = vec![
            Box::new(|s| strip_structural_chars(&s)),
            Box::new(|s| collapse_whitespace(&s)),
        ];

        let result = chain_sanitizers("{Alta  procura}".to_string(), sanitizers);

        assert!(result.was_modified);
        assert_eq!(result.sanitized, "Alta procura");
        let details = result.details.unwrap_or_default();
        assert!(details.contains("Removed structural characters"));
        assert!(details.contains("Collapsed whitespace"));
    }

    #[test]
    fn test_chain_sanitizers_clean_input() {
        let sanitizers: Vec<Box<dyn Fn(String) -> SanitizeResult<String>>> = vec![
            Box::new(|s| strip_structural_chars(&s)),
            Box::new(|s| collapse_whitespace(&s)),
        ];

        let result = chain_sanitizers("Clean text".to_string(), sanitizers);

        assert!(!result.was_modified);
        assert_eq!(result.sanitized, "Clean text");
        assert_eq!(result.details, None);
    }
}
