use std::env;
use std::net::SocketAddr;

use crate::error::{AppError, Result};
use crate::llm::completion::OPENAI_API_URL;
use crate::llm::LLMProvider;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    /// Provider used for sessions that don't name one
    pub provider: LLMProvider,
    /// Model override; the provider's default model is used when unset
    pub model: Option<String>,
    pub openai_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let provider = match lookup("NATBOT_PROVIDER") {
            Some(raw) => raw.parse::<LLMProvider>().unwrap_or_else(|e| {
                tracing::warn!("{}; falling back to {}", e, defaults.provider.as_str());
                defaults.provider
            }),
            None => defaults.provider,
        };

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            host: lookup("HOST").unwrap_or(defaults.host),
            provider,
            model: lookup("NATBOT_MODEL").filter(|m| !m.trim().is_empty()),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(defaults.openai_base_url),
        }
    }

    /// Configured model override, only for the configured provider
    pub fn model_for(&self, provider: LLMProvider) -> Option<&str> {
        if provider == self.provider {
            self.model.as_deref()
        } else {
            None
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::InvalidConfig(format!("bad listen address: {}", e)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8765,
            host: "127.0.0.1".to_string(),
            provider: LLMProvider::OpenAI,
            model: None,
            openai_base_url: OPENAI_API_URL.to_string(),
        }
    }
}

/// Get API key for a provider from the environment
pub fn get_api_key(provider: LLMProvider) -> Option<String> {
    env::var(provider.api_key_env_var())
        .ok()
        .filter(|k| !k.trim().is_empty())
}
