//! HTTP routes for the demo chat API.

pub mod assistants;
pub mod chat;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/assistants",
            post(assistants::create)
                .get(assistants::lookup)
                .delete(assistants::remove),
        )
        .route("/chat", post(chat::send))
        // The demo pages are served from another origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
