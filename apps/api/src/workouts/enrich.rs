//! Optional enrichment: canonicalize exercise names against the names a user
//! has logged before, so "Pullups" joins an existing "pull-up" history.
//!
//! This is a separate stage layered on the parser's output. It needs the
//! user's prior rows, so it can never live inside the parser, which is pure.

use sqlx::PgPool;
use uuid::Uuid;

use crate::workouts::models::WorkoutEntry;

/// Distinct exercise names the user has logged.
pub async fn known_exercise_names(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT DISTINCT e.name
        FROM exercises e
        JOIN workouts w ON w.id = e.workout_id
        WHERE w.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Rewrites exercise names that match a previously-logged name under folding.
/// Novel names pass through untouched. Returns the number of renames.
pub fn canonicalize_names(entries: &mut [WorkoutEntry], known: &[String]) -> usize {
    let mut renamed = 0;
    for entry in entries.iter_mut() {
        for exercise in entry.exercises.iter_mut() {
            if known.contains(&exercise.name) {
                continue;
            }
            let folded = fold(&exercise.name);
            if let Some(canonical) = known.iter().find(|k| fold(k) == folded) {
                exercise.name = canonical.clone();
                renamed += 1;
            }
        }
    }
    renamed
}

/// Case-, separator-, and plural-insensitive comparison key:
/// "Pull ups" / "pullups" / "pull-up" all fold to "pullup".
fn fold(name: &str) -> String {
    let mut key: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if key.ends_with('s') {
        key.pop();
    }
    key
}
