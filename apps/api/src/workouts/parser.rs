//! Response Parser — converts a raw model completion into validated
//! `ParsedWorkouts`, or fails explicitly.
//!
//! Extraction is a single deterministic strategy: fenced block if present,
//! otherwise the trimmed completion, with one brace-scan fallback when the
//! first decode fails. The parser never retries and never fills defaults, so
//! parsing the same completion twice yields structurally identical output.

use serde_json::Value;
use thiserror::Error;

use crate::workouts::models::ParsedWorkouts;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The completion contained no decodable JSON by either extraction
    /// strategy. Carries the original completion for diagnostics.
    #[error("no decodable JSON in model output")]
    MalformedResponse { raw: String },

    /// JSON decoded but violated the expected shape. The message names the
    /// violated invariant.
    #[error("{0}")]
    SchemaViolation(String),
}

/// Parses a model completion into validated workout entries.
pub fn parse_completion(raw: &str) -> Result<ParsedWorkouts, ParseError> {
    let candidate = extract_candidate(raw);

    let value = match serde_json::from_str::<Value>(candidate) {
        Ok(v) => v,
        // One fallback: the first top-level brace-delimited substring. This
        // recovers completions where the model wrapped valid JSON in prose.
        Err(_) => match brace_delimited(candidate) {
            Some(inner) => {
                serde_json::from_str::<Value>(inner).map_err(|_| ParseError::MalformedResponse {
                    raw: raw.to_string(),
                })?
            }
            None => {
                return Err(ParseError::MalformedResponse {
                    raw: raw.to_string(),
                })
            }
        },
    };

    validate_shape(&value)?;

    serde_json::from_value(value).map_err(|e| ParseError::SchemaViolation(e.to_string()))
}

/// Top level must be an object carrying an `entries` array. Anything else
/// (a bare list, a lone entry object) is rejected here rather than surfacing
/// as a confusing field error downstream.
fn validate_shape(value: &Value) -> Result<(), ParseError> {
    if !value.is_object() {
        return Err(ParseError::SchemaViolation(
            "top level must be a JSON object, not a list or scalar".to_string(),
        ));
    }
    match value.get("entries") {
        None => Err(ParseError::SchemaViolation(
            "missing required \"entries\" key".to_string(),
        )),
        Some(entries) if !entries.is_array() => Err(ParseError::SchemaViolation(
            "\"entries\" must be an array".to_string(),
        )),
        Some(_) => Ok(()),
    }
}

/// Locates the candidate JSON text: the interior of a ```json or ``` fence if
/// one is present, otherwise the whole trimmed completion.
fn extract_candidate(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(start) = trimmed.find("```json") {
        let interior = &trimmed[start + 7..];
        if let Some(end) = interior.find("```") {
            return interior[..end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let interior = &trimmed[start + 3..];
        if let Some(end) = interior.find("```") {
            return interior[..end].trim();
        }
    }

    trimmed
}

/// First '{' through last '}', if the span is non-empty.
fn brace_delimited(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_ENTRIES: &str = r#"{"entries": []}"#;

    #[test]
    fn test_fenced_json_block_parses() {
        let completion = "```json\n{\"entries\": []}\n```";
        let parsed = parse_completion(completion).unwrap();
        assert!(parsed.entries.is_empty());
    }

    #[test]
    fn test_fence_without_language_tag_parses() {
        let completion = "```\n{\"entries\": []}\n```";
        let parsed = parse_completion(completion).unwrap();
        assert!(parsed.entries.is_empty());
    }

    #[test]
    fn test_unfenced_json_parses_to_same_result() {
        let fenced = parse_completion("```json\n{\"entries\": []}\n```").unwrap();
        let bare = parse_completion(EMPTY_ENTRIES).unwrap();
        assert_eq!(fenced, bare);
    }

    #[test]
    fn test_prose_wrapped_json_recovered_by_brace_scan() {
        let completion = r#"Sure! Here you go: {"entries":[{"date":"2024-01-01","raw_input":"x","exercises":[]}]} Hope that helps!"#;
        let parsed = parse_completion(completion).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(
            parsed.entries[0].date,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_bare_list_is_schema_violation() {
        let err = parse_completion("[1,2,3]").unwrap_err();
        match err {
            ParseError::SchemaViolation(msg) => assert!(msg.contains("JSON object")),
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_entries_key_is_schema_violation() {
        let err = parse_completion(r#"{"date": "2024-01-01"}"#).unwrap_err();
        match err {
            ParseError::SchemaViolation(msg) => assert!(msg.contains("entries")),
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_entries_not_array_is_schema_violation() {
        let err = parse_completion(r#"{"entries": "none"}"#).unwrap_err();
        match err {
            ParseError::SchemaViolation(msg) => assert!(msg.contains("array")),
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_field_type_is_schema_violation() {
        // entries list present, but an entry is missing its raw_input.
        let err = parse_completion(r#"{"entries": [{"date": "2024-01-01"}]}"#).unwrap_err();
        assert!(matches!(err, ParseError::SchemaViolation(_)));
    }

    #[test]
    fn test_garbage_is_malformed_response_with_raw_attached() {
        let err = parse_completion("not json at all").unwrap_err();
        match err {
            ParseError::MalformedResponse { raw } => assert_eq!(raw, "not json at all"),
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_fence_falls_through_to_brace_scan() {
        let completion = "```json\n{\"entries\": []}";
        let parsed = parse_completion(completion).unwrap();
        assert!(parsed.entries.is_empty());
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let completion = r#"{"entries":[{"date":"2024-01-01","raw_input":"5 pull-ups","exercises":[{"name":"pull-up","sets":[{"set_number":1,"metrics":[{"type":"reps","value":5,"unit":"reps"}]}]}]}]}"#;
        let first = parse_completion(completion).unwrap();
        let second = parse_completion(completion).unwrap();
        assert_eq!(first, second);
    }
}
