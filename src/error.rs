use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Invalid request: {0}")]
    ValidationError(String),

    #[error("Missing input key: {0}")]
    MissingInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("LLM provider error: {0}")]
    LLMError(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            AppError::ValidationError(_) | AppError::MissingInput(_) => {
                (StatusCode::BAD_REQUEST, "Bad Request")
            }
            AppError::InvalidConfig(_) | AppError::MissingApiKey(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration Error")
            }
            AppError::LLMError(_) => (StatusCode::BAD_GATEWAY, "LLM Error"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error"),
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
