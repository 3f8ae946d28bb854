use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::agent::CommandGenerator;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::NatBotSession;

/// Shared application state
pub struct AppState {
    pub config: Config,

    /// Live sessions: session_id -> session.
    /// Each session sits behind its own lock so one generator never runs twice at once.
    pub sessions: DashMap<String, Arc<Mutex<NatBotSession>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: DashMap::new(),
        }
    }

    /// Register a generator and return its session id
    pub fn insert_session(&self, generator: CommandGenerator) -> String {
        let session = NatBotSession::new(generator);
        let id = session.id.clone();
        self.sessions.insert(id.clone(), Arc::new(Mutex::new(session)));
        tracing::info!(
            "Session {} created (active: {})",
            id,
            self.sessions.len()
        );
        id
    }

    /// Look up a session; the map guard is released before returning
    pub fn session(&self, session_id: &str) -> Result<Arc<Mutex<NatBotSession>>> {
        self.sessions
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| AppError::SessionNotFound(session_id.to_string()))
    }

    pub fn remove_session(&self, session_id: &str) -> Result<()> {
        self.sessions
            .remove(session_id)
            .map(|_| {
                tracing::info!(
                    "Session {} removed (active: {})",
                    session_id,
                    self.sessions.len()
                );
            })
            .ok_or_else(|| AppError::SessionNotFound(session_id.to_string()))
    }

    pub fn active_session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
