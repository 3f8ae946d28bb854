use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::backend::{CompletionBackend, SamplingParams};
use crate::error::{AppError, Result};

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Request body for the OpenAI legacy completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub temperature: f32,
    pub best_of: u32,
    pub n: u32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: Option<CompletionUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    #[serde(default)]
    pub index: u32,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Error envelope returned by OpenAI on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIError {
    pub error: OpenAIErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Completion backend speaking to an OpenAI-compatible `/completions` endpoint
pub struct OpenAICompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
    params: SamplingParams,
}

impl OpenAICompletionClient {
    pub fn new(api_key: impl Into<String>, params: SamplingParams) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_API_URL.to_string(),
            params,
        }
    }

    /// Point the client at another OpenAI-compatible server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    pub fn endpoint(&self) -> String {
        format!("{}/completions", self.base_url)
    }

    fn request<'a>(&'a self, prompt: &'a str) -> CompletionRequest<'a> {
        CompletionRequest {
            model: self.params.model(),
            prompt,
            temperature: self.params.temperature(),
            best_of: self.params.best_of(),
            n: self.params.n(),
            max_tokens: self.params.max_tokens(),
        }
    }

    async fn send(&self, prompt: &str) -> Result<CompletionResponse> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.request(prompt))
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse OpenAI response: {}", e)))
    }
}

#[async_trait]
impl CompletionBackend for OpenAICompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self.send(prompt).await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                "Completion {} used {} prompt + {} completion tokens",
                response.id,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        first_choice_text(response)
    }
}

/// The first generation is the answer; the remaining samples are discarded.
fn first_choice_text(response: CompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|c| c.text)
        .ok_or_else(|| AppError::LLMError("No choices in OpenAI response".to_string()))
}

fn error_from_body(status: StatusCode, body: &str) -> AppError {
    let Ok(error) = serde_json::from_str::<OpenAIError>(body) else {
        return AppError::LLMError(format!("OpenAI API error ({}): {}", status, body));
    };

    let detail = error.error;
    let kind = detail
        .code
        .as_deref()
        .or(detail.error_type.as_deref())
        .unwrap_or_default();

    match (status, kind) {
        (StatusCode::UNAUTHORIZED, _) | (_, "invalid_api_key") => {
            AppError::LLMError(format!("Authentication failed: {}", detail.message))
        }
        (_, "insufficient_quota") => {
            AppError::LLMError(format!("Quota exceeded: {}", detail.message))
        }
        (StatusCode::TOO_MANY_REQUESTS, _) => {
            AppError::LLMError(format!("Rate limited: {}", detail.message))
        }
        _ => AppError::LLMError(detail.message),
    }
}
