use async_trait::async_trait;
use serde::Serialize;

use crate::error::{AppError, Result};

/// Model used by the default completion backend
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo-instruct";

/// A text-completion capability: prompt in, text out.
///
/// Implementations own their sampling configuration; callers only hand over
/// the prompt. Errors are returned as-is to whoever drives the backend.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Fixed sampling configuration for a completion backend.
///
/// Defaults: temperature 0.5, best-of 10, 3 samples, at most 50 tokens.
/// Every constructor validates, so a held value is always usable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingParams {
    model: String,
    temperature: f32,
    best_of: u32,
    n: u32,
    max_tokens: u32,
}

impl SamplingParams {
    pub fn new(
        model: impl Into<String>,
        temperature: f32,
        best_of: u32,
        n: u32,
        max_tokens: u32,
    ) -> Result<Self> {
        let params = Self {
            model: model.into(),
            temperature,
            best_of,
            n,
            max_tokens,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Result<Self> {
        self.model = model.into();
        self.validate()?;
        Ok(self)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Result<Self> {
        self.temperature = temperature;
        self.validate()?;
        Ok(self)
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Result<Self> {
        self.max_tokens = max_tokens;
        self.validate()?;
        Ok(self)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn best_of(&self) -> u32 {
        self.best_of
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidConfig("model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::InvalidConfig(format!(
                "temperature must be within [0, 2], got {}",
                self.temperature
            )));
        }
        if self.n == 0 {
            return Err(AppError::InvalidConfig("n must be at least 1".into()));
        }
        if self.best_of < self.n {
            return Err(AppError::InvalidConfig(format!(
                "best_of ({}) must be >= n ({})",
                self.best_of, self.n
            )));
        }
        if self.max_tokens == 0 {
            return Err(AppError::InvalidConfig(
                "max_tokens must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_COMPLETION_MODEL.to_string(),
            temperature: 0.5,
            best_of: 10,
            n: 3,
            max_tokens: 50,
        }
    }
}
