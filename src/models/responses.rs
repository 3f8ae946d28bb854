use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub active_sessions: usize,
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub providers: HashMap<String, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub objective: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub objective: String,
    pub previous_command: String,
    pub command_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub command: String,
}

#[derive(Debug, Serialize)]
pub struct GenericResponse {
    pub status: String,
}
