//! Analysis record model
//!
//! Rows from the market analysis store are loosely typed: any field may be
//! missing, `null`, or of an unexpected type. Records are built from raw JSON
//! values and every field that does not have the expected shape is treated as
//! absent, so building a record never fails.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// One stored market-analysis result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct AnalysisRecord {
    /// Row identifier; numeric ids are kept in their decimal form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-written insights text
    pub insights: Option<String>,
    /// Payload produced by the analysis run
    pub data: Option<AnalysisData>,
    pub analyzed_at: Option<DateTime<Utc>>,
    pub analysis_type: Option<String>,
}

/// The `data` payload of a record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisData {
    /// Raw response returned by the AI provider
    pub raw_response: Option<RawResponse>,
}

/// Raw AI response, stored either as text or as a JSON document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawResponse {
    Text(String),
    Structured(Value),
}

impl RawResponse {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(RawResponse::Text(text)),
            other => Some(RawResponse::Structured(other)),
        }
    }

    /// Text to scan for insights; structured responses are serialized to compact JSON
    pub fn scan_text(&self) -> Cow<'_, str> {
        match self {
            RawResponse::Text(text) => Cow::Borrowed(text.as_str()),
            RawResponse::Structured(value) => Cow::Owned(value.to_string()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RawResponse::Text(_) => "text",
            RawResponse::Structured(_) => "structured",
        }
    }
}

impl AnalysisData {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(mut fields) => Some(AnalysisData {
                raw_response: fields
                    .remove("raw_response")
                    .and_then(RawResponse::from_value),
            }),
            _ => None,
        }
    }
}

impl From<Value> for AnalysisRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::from_fields(fields),
            _ => Self::default(),
        }
    }
}

impl AnalysisRecord {
    fn from_fields(mut fields: Map<String, Value>) -> Self {
        Self {
            id: fields.remove("id").and_then(id_field),
            insights: fields.remove("insights").and_then(string_field),
            data: fields.remove("data").and_then(AnalysisData::from_value),
            analyzed_at: fields.remove("analyzed_at").and_then(timestamp_field),
            analysis_type: fields.remove("analysis_type").and_then(string_field),
        }
    }

    /// Record with only an insights text
    pub fn with_insights<S: Into<String>>(insights: S) -> Self {
        Self {
            insights: Some(insights.into()),
            ..Self::default()
        }
    }

    pub fn raw_response_value(mut self, raw_response: Value) -> Self {
        self.data = Some(AnalysisData {
            raw_response: RawResponse::from_value(raw_response),
        });
        self
    }

    pub fn analyzed_at(mut self, analyzed_at: DateTime<Utc>) -> Self {
        self.analyzed_at = Some(analyzed_at);
        self
    }

    pub fn analysis_type<S: Into<String>>(mut self, analysis_type: S) -> Self {
        self.analysis_type = Some(analysis_type.into());
        self
    }

    pub fn id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Insights text, empty when absent
    pub fn insights_text(&self) -> &str {
        self.insights.as_deref().unwrap_or("")
    }

    pub fn raw_response(&self) -> Option<&RawResponse> {
        self.data.as_ref().and_then(|data| data.raw_response.as_ref())
    }

    /// Raw response as scan text, empty when absent
    pub fn raw_response_text(&self) -> Cow<'_, str> {
        self.raw_response()
            .map(RawResponse::scan_text)
            .unwrap_or(Cow::Borrowed(""))
    }
}

fn string_field(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        _ => None,
    }
}

fn id_field(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn timestamp_field(value: Value) -> Option<DateTime<Utc>> {
    let text = string_field(value)?;
    parse_timestamp(&text)
}

/// Parse an RFC 3339 timestamp, or a zone-less one assumed to be UTC
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_record_from_complete_row() {
        let record: AnalysisRecord = serde_json::from_value(json!({
            "id": 17,
            "insights": "Alta procura por destinos no Nordeste",
            "data": {"raw_response": "texto bruto"},
            "analyzed_at": "2024-05-01T12:30:00+00:00",
            "analysis_type": "social_media",
            "extra": true
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("17"));
        assert_eq!(record.insights_text(), "Alta procura por destinos no Nordeste");
        assert_eq!(record.raw_response_text(), "texto bruto");
        assert_eq!(
            record.analyzed_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
        assert_eq!(record.analysis_type.as_deref(), Some("social_media"));
    }

    #[test]
    fn test_wrong_typed_fields_become_absent() {
        let record: AnalysisRecord = serde_json::from_value(json!({
            "id": {"nested": true},
            "insights": 42,
            "data": "not an object",
            "analyzed_at": "yesterday",
            "analysis_type": ["trends"]
        }))
        .unwrap();

        assert_eq!(record, AnalysisRecord::default());
        assert_eq!(record.insights_text(), "");
        assert_eq!(record.raw_response_text(), "");
    }

    #[test]
    fn test_non_object_row_is_empty_record() {
        let record: AnalysisRecord = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(record, AnalysisRecord::default());
    }

    #[test]
    fn test_structured_raw_response_is_serialized_for_scanning() {
        let record = AnalysisRecord::default()
            .raw_response_value(json!({"summary": "Procura em alta"}));

        assert_eq!(record.raw_response().map(RawResponse::kind), Some("structured"));
        assert_eq!(record.raw_response_text(), r#"{"summary":"Procura em alta"}"#);
    }

    #[test]
    fn test_null_raw_response_is_absent() {
        let record: AnalysisRecord =
            serde_json::from_value(json!({"data": {"raw_response": null}})).unwrap();
        assert!(record.data.is_some());
        assert!(record.raw_response().is_none());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T09:30:00-03:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01 12:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T12:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("01/05/2024"), None);
    }

    #[test]
    fn test_record_serializes_back() {
        let record = AnalysisRecord::with_insights("Texto").analysis_type("trends");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["insights"], "Texto");
        assert_eq!(value["analysis_type"], "trends");
        assert!(value.get("id").is_none());
    }
}
