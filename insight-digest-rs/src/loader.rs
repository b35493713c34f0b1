//! Record loading
//!
//! Reads analysis records from the document shapes the analysis store hands
//! out: a JSON array of rows, a single row, a `{"data": [...]}` / `{"rows": [...]}`
//! envelope, or newline-delimited JSON.

use crate::errors::{DigestError, DigestResult};
use crate::record::AnalysisRecord;
use serde_json::Value;

/// Envelope keys that wrap a list of rows
const ENVELOPE_KEYS: [&str; 2] = ["data", "rows"];

/// Load records from a JSON or NDJSON document
pub fn load_records(input: &str) -> DigestResult<Vec<AnalysisRecord>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(document) => records_from_document(document),
        Err(err) if trimmed.contains('\n') => {
            log::debug!("Input is not a single JSON document ({}), reading as NDJSON", err);
            parse_ndjson(trimmed)
        }
        Err(err) => Err(err.into()),
    }
}

/// Load records from an already-parsed JSON document
pub fn records_from_document(document: Value) -> DigestResult<Vec<AnalysisRecord>> {
    match document {
        Value::Array(rows) => Ok(rows.into_iter().map(AnalysisRecord::from).collect()),
        Value::Object(mut fields) => {
            for key in ENVELOPE_KEYS {
                if matches!(fields.get(key), Some(Value::Array(_))) {
                    if let Some(rows) = fields.remove(key) {
                        return records_from_document(rows);
                    }
                }
            }
            Ok(vec![AnalysisRecord::from(Value::Object(fields))])
        }
        other => Err(DigestError::InvalidFormat(format!(
            "Expected an array or object of records, found {}",
            json_type_name(&other)
        ))),
    }
}

/// Parse NDJSON (one record per line); lines that fail to parse are skipped
pub fn parse_ndjson(input: &str) -> DigestResult<Vec<AnalysisRecord>> {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (line_num, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(value @ Value::Object(_)) => records.push(AnalysisRecord::from(value)),
            Ok(other) => {
                log::warn!(
                    "Skipping NDJSON line {}: expected an object, found {}",
                    line_num + 1,
                    json_type_name(&other)
                );
                errors.push(DigestError::InvalidType(format!("line {}", line_num + 1)));
            }
            Err(err) => {
                log::warn!("Skipping NDJSON line {}: {}", line_num + 1, err);
                errors.push(DigestError::InvalidFormat(format!(
                    "line {}: {}",
                    line_num + 1,
                    err
                )));
            }
        }
    }

    if records.is_empty() && !errors.is_empty() {
        return Err(DigestError::composite_at(errors, "ndjson"));
    }

    Ok(records)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_array() {
        let json = r#"[
            {"id": 1, "insights": "Alta procura por destinos no Nordeste", "analysis_type": "trends"},
            {"id": 2, "insights": null}
        ]"#;

        let records = load_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].analysis_type.as_deref(), Some("trends"));
        assert_eq!(records[1].insights_text(), "");
    }

    #[test]
    fn test_load_envelope() {
        let json = r#"{"data": [{"id": "a"}, {"id": "b"}], "count": 2}"#;
        let records = load_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id.as_deref(), Some("b"));

        let json = r#"{"rows": [{"id": "c"}]}"#;
        assert_eq!(load_records(json).unwrap().len(), 1);
    }

    #[test]
    fn test_record_data_field_is_not_an_envelope() {
        let json = r#"{"id": "x", "data": {"raw_response": "texto"}}"#;
        let records = load_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].raw_response_text(), "texto");
    }

    #[test]
    fn test_load_ndjson() {
        let ndjson = "{\"id\": 1, \"insights\": \"primeira\"}\nnot json\n\n{\"id\": 2}\n";
        let records = load_records(ndjson).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].insights_text(), "primeira");
        assert_eq!(records[1].id.as_deref(), Some("2"));
    }

    #[test]
    fn test_ndjson_without_any_record_fails() {
        let err = load_records("nope\nstill nope").unwrap_err();
        assert!(matches!(err, DigestError::Composite(_)));
    }

    #[test]
    fn test_empty_input_is_empty_list() {
        assert!(load_records("").unwrap().is_empty());
        assert!(load_records("  \n ").unwrap().is_empty());
        assert!(load_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        let err = load_records("42").unwrap_err();
        assert!(matches!(err, DigestError::InvalidFormat(_)));
        assert!(matches!(load_records("\"rows\"").unwrap_err(), DigestError::InvalidFormat(_)));
        assert!(load_records("{ broken").unwrap_err().is_load_error());
    }
}
