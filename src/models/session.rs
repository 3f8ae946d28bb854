use chrono::{DateTime, Utc};

use super::responses::SessionResponse;
use crate::agent::CommandGenerator;

/// One objective being driven by an external browser
#[derive(Debug)]
pub struct NatBotSession {
    pub id: String,
    pub generator: CommandGenerator,
    pub command_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NatBotSession {
    pub fn new(generator: CommandGenerator) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            generator,
            command_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Produce the next command and bump the session counters on success
    pub async fn next_command(&mut self, url: &str, browser_content: &str) -> crate::error::Result<String> {
        let command = self.generator.run(url, browser_content).await?;
        self.command_count += 1;
        self.updated_at = Utc::now();
        Ok(command)
    }

    pub fn summary(&self) -> SessionResponse {
        SessionResponse {
            session_id: self.id.clone(),
            objective: self.generator.objective().to_string(),
            previous_command: self.generator.previous_command().to_string(),
            command_count: self.command_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
