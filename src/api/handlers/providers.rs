use axum::Json;
use std::collections::HashMap;

use crate::models::ProvidersResponse;

/// List LLM providers and the models sessions can ask for
pub async fn list_providers() -> Json<ProvidersResponse> {
    let mut providers = HashMap::new();

    // Completion models: best-of and multi-sample settings apply
    providers.insert(
        "openai".to_string(),
        vec![
            "gpt-3.5-turbo-instruct".to_string(),
            "davinci-002".to_string(),
            "babbage-002".to_string(),
        ],
    );

    providers.insert(
        "anthropic".to_string(),
        vec![
            "claude-3-5-haiku-20241022".to_string(),
            "claude-3-5-sonnet-20241022".to_string(),
        ],
    );

    providers.insert(
        "gemini".to_string(),
        vec![
            "gemini-2.0-flash".to_string(),
            "gemini-2.5-flash".to_string(),
            "gemini-2.5-pro".to_string(),
        ],
    );

    Json(ProvidersResponse { providers })
}
