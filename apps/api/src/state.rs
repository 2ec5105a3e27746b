use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::Completer;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The LLM backend is carried as `Arc<dyn Completer>` so handlers never depend
/// on a concrete client. Tests swap in a canned completer.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: Arc<dyn Completer>,
}
