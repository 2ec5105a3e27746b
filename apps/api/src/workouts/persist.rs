//! Maps validated workout entries onto the normalized schema and issues the
//! inserts: workouts → exercises → exercise_sets → exercise_metrics.
//!
//! Row planning is pure so the mapping rules (date substitution, null-metric
//! filtering, mention-order preservation) are testable without a database.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::workouts::models::{MetricEntry, WorkoutEntry};

pub struct WorkoutPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub raw_input: String,
    pub exercises: Vec<ExercisePlan>,
}

pub struct ExercisePlan {
    pub id: Uuid,
    pub position: i32,
    pub name: String,
    pub activity_type: String,
    pub notes: Option<String>,
    pub sets: Vec<SetPlan>,
}

pub struct SetPlan {
    pub id: Uuid,
    pub set_number: i32,
    pub metrics: Vec<MetricEntry>,
}

/// Plans the rows for one entry. Substitutes the reference date when the
/// entry carries none, stamps the caller's user id, preserves exercise
/// mention order via `position`, and drops metrics with a null value.
pub fn plan_inserts(entry: &WorkoutEntry, user_id: Uuid, reference_date: NaiveDate) -> WorkoutPlan {
    WorkoutPlan {
        id: Uuid::new_v4(),
        user_id,
        date: entry.date.unwrap_or(reference_date),
        raw_input: entry.raw_input.clone(),
        exercises: entry
            .exercises
            .iter()
            .enumerate()
            .map(|(i, exercise)| ExercisePlan {
                id: Uuid::new_v4(),
                position: i as i32,
                name: exercise.name.clone(),
                activity_type: exercise
                    .activity_type
                    .clone()
                    .unwrap_or_else(|| "exercise".to_string()),
                notes: exercise.notes.clone(),
                sets: exercise
                    .sets
                    .iter()
                    .map(|set| SetPlan {
                        id: Uuid::new_v4(),
                        set_number: set.set_number,
                        metrics: set
                            .metrics
                            .iter()
                            .filter(|m| m.value.is_some())
                            .cloned()
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Inserts all entries parent-before-child and returns the created workout
/// ids in entry order.
pub async fn log_workout_entries(
    pool: &PgPool,
    user_id: Uuid,
    entries: &[WorkoutEntry],
    reference_date: NaiveDate,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let mut workout_ids = Vec::with_capacity(entries.len());

    for entry in entries {
        let plan = plan_inserts(entry, user_id, reference_date);

        sqlx::query(
            "INSERT INTO workouts (id, user_id, date, raw_input) VALUES ($1, $2, $3, $4)",
        )
        .bind(plan.id)
        .bind(plan.user_id)
        .bind(plan.date)
        .bind(&plan.raw_input)
        .execute(pool)
        .await?;

        for exercise in &plan.exercises {
            sqlx::query(
                r#"
                INSERT INTO exercises (id, workout_id, position, name, activity_type, notes)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(exercise.id)
            .bind(plan.id)
            .bind(exercise.position)
            .bind(&exercise.name)
            .bind(&exercise.activity_type)
            .bind(&exercise.notes)
            .execute(pool)
            .await?;

            for set in &exercise.sets {
                sqlx::query(
                    "INSERT INTO exercise_sets (id, exercise_id, set_number) VALUES ($1, $2, $3)",
                )
                .bind(set.id)
                .bind(exercise.id)
                .bind(set.set_number)
                .execute(pool)
                .await?;

                for metric in &set.metrics {
                    sqlx::query(
                        r#"
                        INSERT INTO exercise_metrics (id, set_id, metric_type, value, unit)
                        VALUES ($1, $2, $3, $4, $5)
                        "#,
                    )
                    .bind(Uuid::new_v4())
                    .bind(set.id)
                    .bind(&metric.metric_type)
                    .bind(metric.value)
                    .bind(&metric.unit)
                    .execute(pool)
                    .await?;
                }
            }
        }

        info!(
            "Logged workout {} for user {} on {} ({} exercises)",
            plan.id,
            user_id,
            plan.date,
            plan.exercises.len()
        );
        workout_ids.push(plan.id);
    }

    Ok(workout_ids)
}

/// Deletes the user's most recent workout and its children. Returns the
/// deleted workout id, or `None` when the user has no workouts.
pub async fn delete_latest_workout(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    let latest: Option<Uuid> = sqlx::query_scalar(
        "SELECT id FROM workouts WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let Some(workout_id) = latest else {
        return Ok(None);
    };

    // Child-before-parent, mirroring the insert order.
    sqlx::query(
        r#"
        DELETE FROM exercise_metrics WHERE set_id IN (
            SELECT s.id FROM exercise_sets s
            JOIN exercises e ON e.id = s.exercise_id
            WHERE e.workout_id = $1
        )
        "#,
    )
    .bind(workout_id)
    .execute(pool)
    .await?;

    sqlx::query(
        "DELETE FROM exercise_sets WHERE exercise_id IN (SELECT id FROM exercises WHERE workout_id = $1)",
    )
    .bind(workout_id)
    .execute(pool)
    .await?;

    sqlx::query("DELETE FROM exercises WHERE workout_id = $1")
        .bind(workout_id)
        .execute(pool)
        .await?;

    sqlx::query("DELETE FROM workouts WHERE id = $1")
        .bind(workout_id)
        .execute(pool)
        .await?;

    info!("Deleted latest workout {} for user {}", workout_id, user_id);
    Ok(Some(workout_id))
}
