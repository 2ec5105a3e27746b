//! Axum route handlers for the Workout API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::workout::{ExerciseRow, MetricRow, SetRow, WorkoutRow};
use crate::state::AppState;
use crate::workouts::log::{log_utterance, LogOutcome};
use crate::workouts::persist::delete_latest_workout;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LogWorkoutRequest {
    pub user_id: Uuid,
    pub input: String,
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct WorkoutListResponse {
    pub workouts: Vec<WorkoutRow>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutDetailResponse {
    pub workout: WorkoutRow,
    pub exercises: Vec<ExerciseDetail>,
}

#[derive(Debug, Serialize)]
pub struct ExerciseDetail {
    pub exercise: ExerciseRow,
    pub sets: Vec<SetDetail>,
}

#[derive(Debug, Serialize)]
pub struct SetDetail {
    pub set: SetRow,
    pub metrics: Vec<MetricRow>,
}

#[derive(Debug, Serialize)]
pub struct DeleteLatestResponse {
    pub workout_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/workouts
///
/// Accepts a free-text workout description and logs the structured result.
pub async fn handle_log_workout(
    State(state): State<AppState>,
    Json(request): Json<LogWorkoutRequest>,
) -> Result<Json<LogOutcome>, AppError> {
    let input = request.input.trim();
    if input.is_empty() {
        return Err(AppError::Validation("input cannot be empty".to_string()));
    }

    // Reference date is read per request: the model resolves "yesterday"
    // and "last week" against it.
    let today = Local::now().date_naive();

    let outcome = log_utterance(&state.db, state.llm.as_ref(), request.user_id, input, today).await?;
    Ok(Json(outcome))
}

/// GET /api/v1/workouts?user_id=
///
/// Returns the user's recent workouts, newest first.
pub async fn handle_list_workouts(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<WorkoutListResponse>, AppError> {
    let workouts = sqlx::query_as::<_, WorkoutRow>(
        "SELECT * FROM workouts WHERE user_id = $1 ORDER BY date DESC, created_at DESC LIMIT 50",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(WorkoutListResponse { workouts }))
}

/// GET /api/v1/workouts/:id
///
/// Returns one workout with its exercises, sets, and metrics.
pub async fn handle_get_workout(
    State(state): State<AppState>,
    Path(workout_id): Path<Uuid>,
) -> Result<Json<WorkoutDetailResponse>, AppError> {
    let workout = sqlx::query_as::<_, WorkoutRow>("SELECT * FROM workouts WHERE id = $1")
        .bind(workout_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Workout {workout_id} not found")))?;

    let exercise_rows = sqlx::query_as::<_, ExerciseRow>(
        "SELECT * FROM exercises WHERE workout_id = $1 ORDER BY position",
    )
    .bind(workout_id)
    .fetch_all(&state.db)
    .await?;

    let mut exercises = Vec::with_capacity(exercise_rows.len());
    for exercise in exercise_rows {
        let set_rows = sqlx::query_as::<_, SetRow>(
            "SELECT * FROM exercise_sets WHERE exercise_id = $1 ORDER BY set_number",
        )
        .bind(exercise.id)
        .fetch_all(&state.db)
        .await?;

        let mut sets = Vec::with_capacity(set_rows.len());
        for set in set_rows {
            let metrics = sqlx::query_as::<_, MetricRow>(
                "SELECT * FROM exercise_metrics WHERE set_id = $1",
            )
            .bind(set.id)
            .fetch_all(&state.db)
            .await?;
            sets.push(SetDetail { set, metrics });
        }

        exercises.push(ExerciseDetail { exercise, sets });
    }

    Ok(Json(WorkoutDetailResponse { workout, exercises }))
}

/// DELETE /api/v1/workouts/latest?user_id=
///
/// Removes the user's most recent workout. The same correction is reachable
/// by sending "delete my last workout" to the log endpoint.
pub async fn handle_delete_latest(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DeleteLatestResponse>, AppError> {
    let workout_id = delete_latest_workout(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No workouts to delete".to_string()))?;

    Ok(Json(DeleteLatestResponse { workout_id }))
}
