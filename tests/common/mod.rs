//! Test doubles shared by the integration tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use natbot_sidecar::{AppError, CompletionBackend, Result};

/// Backend that answers from a fixed script and records every prompt
pub struct StubBackend {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl StubBackend {
    pub fn scripted(replies: &[std::result::Result<&str, &str>]) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .iter()
                    .copied()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompt_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl CompletionBackend for StubBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        // Hand control back so concurrent callers interleave here
        tokio::task::yield_now().await;
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(AppError::LLMError(message)),
            None => Err(AppError::LLMError("no scripted reply left".to_string())),
        }
    }
}
