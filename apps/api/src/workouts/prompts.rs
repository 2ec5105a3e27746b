//! Workout parsing prompts.
//!
//! `build_parse_prompt` is a pure function of the utterance and the reference
//! date: no hidden state, no clock reads, no I/O. The caller supplies the
//! current date at call time so the model can resolve "yesterday" and
//! "last week".

use chrono::NaiveDate;

/// System prompt for workout parsing — enforces JSON-only output.
pub const PARSE_SYSTEM: &str = "You are a precise workout log extractor. \
    Convert a natural language workout description into structured JSON. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Workout parsing prompt template.
/// Replace `{current_date}` and `{utterance}` before sending.
const PARSE_PROMPT_TEMPLATE: &str = r#"Today's date is {current_date}.
Convert the workout description below into structured JSON.

Return a JSON object with this EXACT schema (no extra fields):
{
  "entries": [
    {
      "date": "YYYY-MM-DD",
      "raw_input": "the portion of the input this entry describes",
      "exercises": [
        {
          "name": "pull-up",
          "activity_type": "exercise",
          "notes": "any notes or null",
          "sets": [
            {
              "set_number": 1,
              "metrics": [
                {"type": "reps", "value": 10, "unit": "reps"},
                {"type": "weight", "value": 50, "unit": "kg"},
                {"type": "time", "value": 300, "unit": "sec"},
                {"type": "distance", "value": 5, "unit": "km"}
              ]
            }
          ]
        }
      ]
    }
  ]
}

Rules for parsing:

1. ALWAYS return the {"entries": [...]} wrapper object — never a raw array.
2. If the input mentions multiple dates, create a separate entry for each date.
   Resolve relative dates ("yesterday", "last week") against today's date above.
   If no date is mentioned, set "date" to null.
3. Convert ALL time values to seconds: "25 minutes" becomes 1500, "45:18"
   becomes 2718. The unit for time is always "sec".
4. Use canonical exercise names: lowercase, hyphenated compounds — "pullups"
   and "pull ups" become "pull-up", "muscleups" becomes "muscle-up".
5. If the SAME exercise is mentioned again later in the input, add another set
   with the next set_number under that exercise — never merge the counts.
   set_number starts at 1 and increases by 1 per exercise.
6. Use "rounds" as the metric type for round-based workouts.
7. If a metric's value is unknown, set "value" to null.
8. Include only metrics the input supports — do not invent numbers.

INPUT: "{utterance}"
"#;

/// Builds the parse prompt for one utterance against a reference date.
pub fn build_parse_prompt(utterance: &str, reference_date: NaiveDate) -> String {
    PARSE_PROMPT_TEMPLATE
        .replace("{current_date}", &reference_date.format("%Y-%m-%d").to_string())
        .replace("{utterance}", utterance)
}
