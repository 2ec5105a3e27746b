//! Typed shape of the model's structured output.
//!
//! The parser decodes into these records in one pass; any "what if this field
//! is missing" decision lives here and in `parser`, never in persistence code.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Top-level wrapper the model is asked to produce. Always an object with an
/// `entries` array, never a bare list, so one utterance can describe workouts
/// on several different days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedWorkouts {
    pub entries: Vec<WorkoutEntry>,
}

/// One logical workout record: one date, one or more exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// `None` when the utterance names no date. The caller substitutes the
    /// reference date before persistence; a stored workout always has one.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// The portion of the original utterance this entry was derived from.
    /// Kept verbatim for audit and debugging.
    pub raw_input: String,
    /// Mention order from the utterance is preserved. Empty means the model
    /// recognized no exercise in the text.
    pub exercises: Vec<ExerciseEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Canonical spelling, e.g. "pull-up" — the prompt instructs the model to
    /// normalize variants like "pullups".
    pub name: String,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

/// One set of an exercise. Repeated mentions of the same exercise become
/// successive set numbers, never merged counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    /// 1-based, strictly increasing per exercise.
    pub set_number: i32,
    #[serde(default)]
    pub metrics: Vec<MetricEntry>,
}

/// A (type, value, unit) measurement on a set.
///
/// Observed types: "reps" (unit "reps"), "weight" ("kg"), "distance" ("km"),
/// "time" (always seconds), plus open-ended counters such as "rounds". The
/// type stays a string so new counters don't need a code change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    #[serde(rename = "type")]
    pub metric_type: String,
    /// `None` means the model couldn't determine a value. Null metrics are
    /// dropped at the mapping step, never stored as placeholders.
    pub value: Option<f64>,
    pub unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_FIXTURE: &str = r#"{
        "entries": [
            {
                "date": "2025-11-03",
                "raw_input": "3x8 squats at 60kg, then ran 5km in 25 minutes",
                "exercises": [
                    {
                        "name": "squat",
                        "activity_type": "exercise",
                        "notes": null,
                        "sets": [
                            {"set_number": 1, "metrics": [
                                {"type": "reps", "value": 8, "unit": "reps"},
                                {"type": "weight", "value": 60, "unit": "kg"}
                            ]},
                            {"set_number": 2, "metrics": [
                                {"type": "reps", "value": 8, "unit": "reps"},
                                {"type": "weight", "value": 60, "unit": "kg"}
                            ]},
                            {"set_number": 3, "metrics": [
                                {"type": "reps", "value": 8, "unit": "reps"},
                                {"type": "weight", "value": 60, "unit": "kg"}
                            ]}
                        ]
                    },
                    {
                        "name": "running",
                        "activity_type": "cardio",
                        "notes": "felt good",
                        "sets": [
                            {"set_number": 1, "metrics": [
                                {"type": "distance", "value": 5, "unit": "km"},
                                {"type": "time", "value": 1500, "unit": "sec"}
                            ]}
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_full_fixture_deserializes() {
        let parsed: ParsedWorkouts = serde_json::from_str(FULL_FIXTURE).unwrap();
        assert_eq!(parsed.entries.len(), 1);

        let entry = &parsed.entries[0];
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 11, 3));
        assert_eq!(entry.exercises.len(), 2);
        assert_eq!(entry.exercises[0].name, "squat");
        assert_eq!(entry.exercises[0].sets.len(), 3);
        assert_eq!(entry.exercises[1].notes.as_deref(), Some("felt good"));
    }

    #[test]
    fn test_exercise_order_is_mention_order() {
        let parsed: ParsedWorkouts = serde_json::from_str(FULL_FIXTURE).unwrap();
        let names: Vec<&str> = parsed.entries[0]
            .exercises
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["squat", "running"]);
    }

    #[test]
    fn test_set_numbers_are_sequential_from_one() {
        let parsed: ParsedWorkouts = serde_json::from_str(FULL_FIXTURE).unwrap();
        let numbers: Vec<i32> = parsed.entries[0].exercises[0]
            .sets
            .iter()
            .map(|s| s.set_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_date_decodes_to_none() {
        let json = r#"{"entries": [{"date": null, "raw_input": "5 pull-ups", "exercises": []}]}"#;
        let parsed: ParsedWorkouts = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.entries[0].date, None);
    }

    #[test]
    fn test_omitted_date_key_decodes_to_none() {
        let json = r#"{"entries": [{"raw_input": "5 pull-ups", "exercises": []}]}"#;
        let parsed: ParsedWorkouts = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.entries[0].date, None);
    }

    #[test]
    fn test_null_metric_value_decodes_to_none() {
        let json = r#"{"type": "weight", "value": null, "unit": "kg"}"#;
        let metric: MetricEntry = serde_json::from_str(json).unwrap();
        assert_eq!(metric.value, None);
        assert_eq!(metric.metric_type, "weight");
    }

    #[test]
    fn test_empty_entries_is_valid() {
        let parsed: ParsedWorkouts = serde_json::from_str(r#"{"entries": []}"#).unwrap();
        assert!(parsed.entries.is_empty());
    }
}
