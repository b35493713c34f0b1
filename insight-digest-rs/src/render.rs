//! Plain text rendering of digests and record summaries

use crate::digest::{DigestEntry, InsightDigest, RecordSummary};

/// Shown in place of entries when a digest has nothing to display
pub const NO_DATA_MESSAGE: &str = "No insights available";

/// Marker written before every bullet line
pub const BULLET_PREFIX: &str = "• ";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render a digest as plain text
pub fn render_text(digest: &InsightDigest) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", digest.title));
    if let Some(subtitle) = &digest.subtitle {
        out.push_str(&format!("{}\n", subtitle));
    }

    if digest.is_empty() {
        out.push_str(&format!("\n{}\n", NO_DATA_MESSAGE));
        return out;
    }

    for entry in digest.entries.iter().filter(|entry| entry.has_content()) {
        out.push('\n');
        render_entry(&mut out, entry);
    }

    out
}

fn render_entry(out: &mut String, entry: &DigestEntry) {
    let heading = entry_heading(entry);
    if !heading.is_empty() {
        out.push_str(&format!("{}\n", heading));
    }

    for bullet in &entry.bullets {
        out.push_str(&format!("{}{}\n", BULLET_PREFIX, bullet));
    }

    if let Some(summary) = &entry.summary {
        out.push_str(&format!("{}\n", summary));
    }
}

fn entry_heading(entry: &DigestEntry) -> String {
    let date = entry
        .analyzed_at
        .map(|at| at.format(DATE_FORMAT).to_string());

    match (entry.analysis_type.as_deref(), date) {
        (Some(kind), Some(date)) => format!("[{}] {}", date, kind),
        (Some(kind), None) => kind.to_string(),
        (None, Some(date)) => format!("[{}]", date),
        (None, None) => String::new(),
    }
}

/// Render one line per record summary for debugging
pub fn render_summaries(summaries: &[RecordSummary]) -> String {
    let mut out = String::new();

    for (idx, summary) in summaries.iter().enumerate() {
        out.push_str(&format!(
            "#{} id={} type={} analyzed_at={} insights_chars={} raw_response={} bullet_candidates={}\n",
            idx + 1,
            summary.id.as_deref().unwrap_or("-"),
            summary.analysis_type.as_deref().unwrap_or("-"),
            summary
                .analyzed_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_else(|| "-".to_string()),
            summary.insights_chars,
            summary.raw_response,
            summary.bullet_candidates,
        ));
    }

    out.push_str(&format!("{} record(s)\n", summaries.len()));
    out
}
