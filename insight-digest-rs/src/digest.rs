//! Digest assembly
//!
//! Picks the most recent records and turns each one into a displayable entry.
//! Bullets come from the extractor; when a record produces none, its insights
//! text is used as a single summary line if it is fit for display.

use crate::extractors::{candidate_bullets, extract_bullets};
use crate::record::{AnalysisRecord, RawResponse};
use crate::sanitizers::sanitize_for_display;
use crate::validators::is_valid_for_display;
use crate::DigestOptions;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Rendered-ready view of a set of analysis records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightDigest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub entries: Vec<DigestEntry>,
}

/// One analysis record as shown in a digest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Sanitized analysis type, absent when nothing displayable remains
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<DateTime<Utc>>,
    pub bullets: Vec<String>,
    /// Sanitized insights text, only set when there are no bullets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl DigestEntry {
    pub fn has_content(&self) -> bool {
        !self.bullets.is_empty() || self.summary.is_some()
    }
}

impl InsightDigest {
    /// True when no entry has anything to show
    pub fn is_empty(&self) -> bool {
        !self.entries.iter().any(DigestEntry::has_content)
    }
}

/// Order records newest first and keep at most `limit`
///
/// Records without a timestamp sort after dated ones; ties keep input order.
pub fn select_recent(records: &[AnalysisRecord], limit: usize) -> Vec<&AnalysisRecord> {
    let mut selected: Vec<&AnalysisRecord> = records.iter().collect();
    selected.sort_by(|a, b| newest_first(a.analyzed_at.as_ref(), b.analyzed_at.as_ref()));
    selected.truncate(limit);
    selected
}

fn newest_first(a: Option<&DateTime<Utc>>, b: Option<&DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Build a digest from the most recent records
pub fn build_digest(records: &[AnalysisRecord], options: &DigestOptions) -> InsightDigest {
    let entries = select_recent(records, options.limit)
        .into_iter()
        .map(|record| build_entry(record, options))
        .collect::<Vec<_>>();

    log::debug!(
        "Built digest with {} of {} record(s)",
        entries.len(),
        records.len()
    );

    InsightDigest {
        title: options.title.clone(),
        subtitle: options.subtitle.clone(),
        entries,
    }
}

/// Build the digest entry for a single record
pub fn build_entry(record: &AnalysisRecord, options: &DigestOptions) -> DigestEntry {
    let bullets = extract_bullets(record, options.bullets_per_analysis);

    let summary = if bullets.is_empty() {
        let text = sanitize_for_display(record.insights_text());
        is_valid_for_display(&text, options.min_display_length).then_some(text)
    } else {
        None
    };

    let analysis_type = record
        .analysis_type
        .as_deref()
        .map(sanitize_for_display)
        .filter(|text| !text.is_empty());

    DigestEntry {
        id: record.id.clone(),
        analysis_type,
        analyzed_at: record.analyzed_at,
        bullets,
        summary,
    }
}

/// Debug overview of a stored record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSummary {
    pub id: Option<String>,
    pub analysis_type: Option<String>,
    pub analyzed_at: Option<DateTime<Utc>>,
    /// Insights length in characters
    pub insights_chars: usize,
    /// `none`, `text` or `structured`
    pub raw_response: &'static str,
    /// Distinct bullets the record would yield without a cap
    pub bullet_candidates: usize,
}

/// Describe a record without rendering it
pub fn summarize_record(record: &AnalysisRecord) -> RecordSummary {
    let working = format!("{}\n{}", record.insights_text(), record.raw_response_text());
    let bullet_candidates = candidate_bullets(&working)
        .map(|bullet| bullet.to_lowercase())
        .collect::<HashSet<_>>()
        .len();

    RecordSummary {
        id: record.id.clone(),
        analysis_type: record.analysis_type.clone(),
        analyzed_at: record.analyzed_at,
        insights_chars: record.insights_text().chars().count(),
        raw_response: record.raw_response().map_or("none", RawResponse::kind),
        bullet_candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
    }

    fn sample_records() -> Vec<AnalysisRecord> {
        vec![
            AnalysisRecord::with_insights("Reservas para o litoral aumentaram em maio")
                .id("old")
                .analyzed_at(at(1)),
            AnalysisRecord::with_insights("Sem data").id("undated"),
            AnalysisRecord::with_insights("Procura por pacotes de praia em alta no Nordeste")
                .id("new")
                .analyzed_at(at(20))
                .analysis_type("**social_media** 📊"),
            AnalysisRecord::with_insights("Turismo de inverno cresce na serra gaúcha")
                .id("mid")
                .analyzed_at(at(10)),
        ]
    }

    #[test]
    fn test_select_recent_orders_newest_first() {
        let records = sample_records();
        let ids: Vec<_> = select_recent(&records, 10)
            .into_iter()
            .filter_map(|r| r.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old", "undated"]);

        assert_eq!(select_recent(&records, 2).len(), 2);
        assert!(select_recent(&records, 0).is_empty());
    }

    #[test]
    fn test_build_digest_uses_options() {
        let options = DigestOptions {
            limit: 2,
            subtitle: Some("Últimas análises".to_string()),
            ..DigestOptions::default()
        };

        let digest = build_digest(&sample_records(), &options);

        assert_eq!(digest.title, options.title);
        assert_eq!(digest.subtitle.as_deref(), Some("Últimas análises"));
        assert_eq!(digest.entries.len(), 2);
        assert_eq!(digest.entries[0].id.as_deref(), Some("new"));
        assert_eq!(digest.entries[0].analysis_type.as_deref(), Some("social_media"));
        assert_eq!(
            digest.entries[0].bullets,
            vec!["Procura por pacotes de praia em alta no Nordeste"]
        );
        assert!(!digest.is_empty());
    }

    #[test]
    fn test_summary_fallback_when_no_bullets() {
        let options = DigestOptions::default();

        // 19 characters: too short for a bullet, long enough to display
        let record = AnalysisRecord::with_insights(" Praias lotadas  hoje ");
        let entry = build_entry(&record, &options);
        assert!(entry.bullets.is_empty());
        assert_eq!(entry.summary.as_deref(), Some("Praias lotadas hoje"));

        let record = AnalysisRecord::with_insights("{\"status\": \"ok\"}");
        let entry = build_entry(&record, &options);
        assert!(entry.bullets.is_empty());
        assert_eq!(entry.summary, None);
        assert!(!entry.has_content());
    }

    #[test]
    fn test_empty_digest() {
        let digest = build_digest(&[], &DigestOptions::default());
        assert!(digest.entries.is_empty());
        assert!(digest.is_empty());

        let digest = build_digest(&[AnalysisRecord::default()], &DigestOptions::default());
        assert_eq!(digest.entries.len(), 1);
        assert!(digest.is_empty());
    }

    #[test]
    fn test_summarize_record() {
        let record = AnalysisRecord::with_insights(
            "Alta procura por destinos no Nordeste\n- alta procura por destinos no nordeste",
        )
        .id("7")
        .raw_response_value(json!({"trend": "Viagens de fim de semana em alta"}));

        let summary = summarize_record(&record);
        assert_eq!(summary.id.as_deref(), Some("7"));
        assert_eq!(summary.raw_response, "structured");
        assert_eq!(summary.bullet_candidates, 2);
        assert_eq!(summary.insights_chars, 77);

        let empty = summarize_record(&AnalysisRecord::default());
        assert_eq!(empty.raw_response, "none");
        assert_eq!(empty.bullet_candidates, 0);
    }
}
