use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest, ChatResponse};
use genai::Client;
use serde::{Deserialize, Serialize};

use super::backend::{CompletionBackend, SamplingParams, DEFAULT_COMPLETION_MODEL};
use crate::error::{AppError, Result};

/// LLM Provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    Anthropic,
    OpenAI,
    Gemini,
}

impl LLMProvider {
    /// Get the environment variable name for the API key
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            LLMProvider::Anthropic => "ANTHROPIC_API_KEY",
            LLMProvider::OpenAI => "OPENAI_API_KEY",
            LLMProvider::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Model used when a session does not name one
    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::Anthropic => "claude-3-5-haiku-20241022",
            LLMProvider::OpenAI => DEFAULT_COMPLETION_MODEL,
            LLMProvider::Gemini => "gemini-2.0-flash",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LLMProvider::Anthropic => "anthropic",
            LLMProvider::OpenAI => "openai",
            LLMProvider::Gemini => "gemini",
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(LLMProvider::Anthropic),
            "openai" | "gpt" => Ok(LLMProvider::OpenAI),
            "gemini" | "google" => Ok(LLMProvider::Gemini),
            _ => Err(AppError::ValidationError(format!(
                "Unknown LLM provider: {}",
                s
            ))),
        }
    }
}

/// Completion backend for chat-only models, routed through genai.
///
/// genai picks the provider from the model prefix (gemini-, gpt-, claude-).
/// Chat APIs have no best-of or multi-sample knobs, so only temperature and
/// max_tokens are forwarded.
pub struct ChatCompletionClient {
    client: Client,
    provider: LLMProvider,
    params: SamplingParams,
}

impl ChatCompletionClient {
    /// genai resolves the API key from the provider's environment variable
    pub fn new(provider: LLMProvider, params: SamplingParams) -> Self {
        Self {
            client: Client::default(),
            provider,
            params,
        }
    }

    pub fn provider(&self) -> LLMProvider {
        self.provider
    }

    fn options(&self) -> ChatOptions {
        ChatOptions::default()
            .with_temperature(self.params.temperature() as f64)
            .with_max_tokens(self.params.max_tokens())
    }
}

#[async_trait]
impl CompletionBackend for ChatCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let options = self.options();

        let response: ChatResponse = self
            .client
            .exec_chat(self.params.model(), request, Some(&options))
            .await
            .map_err(|e| AppError::LLMError(format!("LLM request failed: {}", e)))?;

        let text = response
            .first_text()
            .ok_or_else(|| AppError::LLMError("No text in LLM response".to_string()))?
            .to_string();

        Ok(text)
    }
}
