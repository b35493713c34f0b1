//! # Insight Digest Library
//!
//! Display-side processing for stored market analysis records: AI-generated
//! insights about social media and travel trends that arrive as loosely typed
//! rows and free-form prose.
//!
//! ## Features
//!
//! - Display text sanitization (nested JSON strings, markdown, emoji, whitespace)
//! - Display-worthiness validation
//! - Bullet extraction from free-form insights and raw AI responses
//! - Permissive record model and loaders for JSON / NDJSON documents
//! - Digest assembly and plain text rendering
//!
//! The sanitizer and the extractor are pure functions with no shared state and
//! may be called from any number of threads at once.

mod errors;
pub mod digest;
pub mod extractors;
pub mod loader;
pub mod record;
pub mod render;
pub mod sanitizers;
pub mod validators;

pub use digest::{build_digest, summarize_record, DigestEntry, InsightDigest, RecordSummary};
pub use errors::{CompositeError, DigestError, DigestResult};
pub use extractors::extract_bullets;
pub use loader::load_records;
pub use record::AnalysisRecord;
pub use sanitizers::{sanitize_for_display, sanitize_text, sanitize_value};
pub use validators::is_valid_for_display;

/// Re-export commonly used items for convenience
pub mod prelude {
    pub use crate::digest::{build_digest, InsightDigest};
    pub use crate::errors::{DigestError, DigestResult};
    pub use crate::extractors::extract_bullets;
    pub use crate::record::AnalysisRecord;
    pub use crate::sanitizers;
    pub use crate::validators;
    pub use crate::DigestOptions;
}

/// Version of the digest library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of records rendered in a digest
pub const DEFAULT_RECORD_LIMIT: usize = 3;

/// Default number of bullets per record
pub const DEFAULT_BULLETS_PER_ANALYSIS: usize = 3;

/// Default minimum length, in characters, of displayable text
pub const DEFAULT_MIN_DISPLAY_LENGTH: usize = 15;

/// Default digest title
pub const DEFAULT_TITLE: &str = "Market Insights";

/// Fragments shorter than this many characters are not bullets
pub const MIN_FRAGMENT_LENGTH: usize = 21;

/// Longest bullet, in characters, ellipsis included
pub const MAX_BULLET_LENGTH: usize = 220;

/// Appended to truncated bullets
pub const BULLET_ELLIPSIS: &str = "...";

/// Maximum number of nested JSON string layers the sanitizer unwraps
pub const MAX_UNWRAP_DEPTH: usize = 5;

/// Options for building a digest
#[derive(Debug, Clone, PartialEq)]
pub struct DigestOptions {
    /// Maximum number of records to render
    pub limit: usize,
    /// Maximum bullets per record
    pub bullets_per_analysis: usize,
    /// Minimum length of the summary fallback text
    pub min_display_length: usize,
    pub title: String,
    pub subtitle: Option<String>,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RECORD_LIMIT,
            bullets_per_analysis: DEFAULT_BULLETS_PER_ANALYSIS,
            min_display_length: DEFAULT_MIN_DISPLAY_LENGTH,
            title: DEFAULT_TITLE.to_string(),
            subtitle: None,
        }
    }
}

/// Get a new default set of digest options
pub fn default_options() -> DigestOptions {
    DigestOptions::default()
}
