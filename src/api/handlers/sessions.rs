use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::agent::CommandGenerator;
use crate::error::{AppError, Result};
use crate::llm::{self, LLMProvider};
use crate::models::{
    CommandRequest, CommandResponse, CreateSessionRequest, CreateSessionResponse, GenericResponse,
    SessionResponse,
};

use super::super::state::AppState;

/// Create a session for an objective
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>> {
    let objective = request.objective.trim();
    if objective.is_empty() {
        return Err(AppError::ValidationError(
            "objective must not be empty".to_string(),
        ));
    }

    let provider: LLMProvider = match request.llm_provider.as_deref() {
        Some(raw) => raw.parse()?,
        None => state.config.provider,
    };
    let model = request
        .llm_model
        .as_deref()
        .or(state.config.model_for(provider));

    let backend = llm::build_backend(&state.config, provider, model).map_err(|e| {
        tracing::error!("Failed to build {} backend: {}", provider.as_str(), e);
        e
    })?;

    let generator = CommandGenerator::new(objective, backend);
    let session_id = state.insert_session(generator);

    Ok(Json(CreateSessionResponse {
        session_id,
        objective: objective.to_string(),
    }))
}

/// Get a session's objective and last command
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>> {
    let session = state.session(&session_id)?;
    let session = session.lock().await;
    Ok(Json(session.summary()))
}

/// Generate the next command for the page the driver is on.
///
/// Holds the session lock for the whole backend call, so turns within one
/// session are strictly sequential.
pub async fn issue_command(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<CommandResponse>> {
    let session = state.session(&session_id)?;
    let mut session = session.lock().await;

    let command = session
        .next_command(&request.url, &request.browser_content)
        .await
        .map_err(|e| {
            tracing::error!("Session {} failed to generate a command: {}", session_id, e);
            e
        })?;

    tracing::info!(
        "Session {} turn {}: {}",
        session_id,
        session.command_count,
        command
    );

    Ok(Json(CommandResponse { command }))
}

/// Drop a session
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<GenericResponse>> {
    state.remove_session(&session_id)?;
    Ok(Json(GenericResponse {
        status: "deleted".to_string(),
    }))
}
