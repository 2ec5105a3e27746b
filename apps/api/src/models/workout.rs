use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub raw_input: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExerciseRow {
    pub id: Uuid,
    pub workout_id: Uuid,
    /// Mention order within the workout, 0-based.
    pub position: i32,
    pub name: String,
    pub activity_type: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SetRow {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub set_number: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MetricRow {
    pub id: Uuid,
    pub set_id: Uuid,
    pub metric_type: String,
    pub value: f64,
    pub unit: String,
}
