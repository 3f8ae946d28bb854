use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{health, providers, sessions};
use super::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // LLM Providers
        .route("/providers", get(providers::list_providers))
        // Session endpoints
        .route("/sessions", post(sessions::create_session))
        .route(
            "/sessions/:session_id",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route(
            "/sessions/:session_id/command",
            post(sessions::issue_command),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
