pub mod backend;
pub mod client;
pub mod completion;
pub mod prompts;

pub use backend::{CompletionBackend, SamplingParams, DEFAULT_COMPLETION_MODEL};
pub use client::{ChatCompletionClient, LLMProvider};
pub use completion::OpenAICompletionClient;

use crate::config::{self, Config};
use crate::error::{AppError, Result};

/// Build the backend for a provider/model pair, with the key from the environment.
///
/// OpenAI goes through the completions endpoint so best-of and multi-sample
/// settings apply; the other providers only offer chat models.
pub fn build_backend(
    config: &Config,
    provider: LLMProvider,
    model: Option<&str>,
) -> Result<Box<dyn CompletionBackend>> {
    build_backend_with_key(config, provider, model, config::get_api_key(provider))
}

/// Same as [`build_backend`] with the API key supplied by the caller.
///
/// A blank or missing key is a `MissingApiKey` error for every provider.
/// OpenAI sends the key directly; genai looks it up in the environment.
pub fn build_backend_with_key(
    config: &Config,
    provider: LLMProvider,
    model: Option<&str>,
    api_key: Option<String>,
) -> Result<Box<dyn CompletionBackend>> {
    let model = model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| provider.default_model());
    let params = SamplingParams::default().with_model(model)?;

    let api_key = api_key
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| AppError::MissingApiKey(provider.api_key_env_var().to_string()))?;

    tracing::debug!("Building {} backend with model {}", provider.as_str(), model);

    match provider {
        LLMProvider::OpenAI => Ok(Box::new(
            OpenAICompletionClient::new(api_key, params).with_base_url(&config.openai_base_url),
        )),
        // genai reads the key from the provider's environment variable itself
        LLMProvider::Anthropic | LLMProvider::Gemini => {
            Ok(Box::new(ChatCompletionClient::new(provider, params)))
        }
    }
}
