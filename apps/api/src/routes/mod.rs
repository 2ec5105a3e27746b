pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;
use crate::workouts::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/workouts",
            post(handlers::handle_log_workout).get(handlers::handle_list_workouts),
        )
        .route(
            "/api/v1/workouts/latest",
            delete(handlers::handle_delete_latest),
        )
        .route("/api/v1/workouts/:id", get(handlers::handle_get_workout))
        .with_state(state)
}
