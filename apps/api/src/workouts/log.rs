//! The log pipeline: utterance → prompt → model → parse → enrich → persist.
//!
//! Edit commands short-circuit before anything reaches the model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::Completer;
use crate::workouts::edit::{detect_edit_command, EditCommand};
use crate::workouts::enrich::{canonicalize_names, known_exercise_names};
use crate::workouts::models::ParsedWorkouts;
use crate::workouts::parser::parse_completion;
use crate::workouts::persist::{delete_latest_workout, log_workout_entries};
use crate::workouts::prompts::{build_parse_prompt, PARSE_SYSTEM};

/// What the log endpoint did with an utterance.
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LogOutcome {
    Logged {
        entries_logged: usize,
        workout_ids: Vec<Uuid>,
    },
    DeletedLatest {
        workout_id: Uuid,
    },
}

/// Prompts the model and parses its completion into validated entries.
/// Everything except the one LLM call is pure.
pub async fn parse_utterance(
    llm: &dyn Completer,
    utterance: &str,
    reference_date: NaiveDate,
) -> Result<ParsedWorkouts, AppError> {
    let prompt = build_parse_prompt(utterance, reference_date);
    let completion = llm
        .complete(&prompt, PARSE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Workout parsing failed: {e}")))?;
    Ok(parse_completion(&completion)?)
}

/// Full pipeline for one inbound utterance.
pub async fn log_utterance(
    pool: &PgPool,
    llm: &dyn Completer,
    user_id: Uuid,
    utterance: &str,
    reference_date: NaiveDate,
) -> Result<LogOutcome, AppError> {
    if let Some(EditCommand::DeleteLatest) = detect_edit_command(utterance) {
        let workout_id = delete_latest_workout(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No workouts to delete".to_string()))?;
        return Ok(LogOutcome::DeletedLatest { workout_id });
    }

    let mut parsed = parse_utterance(llm, utterance, reference_date).await?;
    info!("Parsed {} workout entries", parsed.entries.len());

    let known = known_exercise_names(pool, user_id).await?;
    let renamed = canonicalize_names(&mut parsed.entries, &known);
    if renamed > 0 {
        debug!("Canonicalized {renamed} exercise names against logged history");
    }

    let workout_ids = log_workout_entries(pool, user_id, &parsed.entries, reference_date).await?;

    Ok(LogOutcome::Logged {
        entries_logged: workout_ids.len(),
        workout_ids,
    })
}
