pub mod intents;
pub mod pool_yields;
pub mod suggestions;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::AppState;

/// Build the application router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/pool_yields/top", get(pool_yields::top))
        .route("/pool_yields/suggest", get(pool_yields::suggest))
        .route(
            "/yield_suggestions",
            get(suggestions::list).post(suggestions::create),
        )
        .route("/yield_suggestions/{id}", get(suggestions::by_id))
        .route(
            "/yield_suggestions/{id}/createIntent",
            post(intents::create_intent),
        )
        .route(
            "/yield_suggestion_intent/{id}/submitSignedTransaction",
            post(intents::submit_signed_transaction),
        )
        .with_state(state);

    Router::new()
        .route("/health-check", get(health_check))
        .nest("/api/v1", api)
}

/// GET /health-check — liveness probe.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "message": "API is running" }))
}
