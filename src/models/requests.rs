use serde::Deserialize;

/// Start a command-generation session for one objective
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub objective: String,
    /// Falls back to the configured provider
    pub llm_provider: Option<String>,
    /// Falls back to the configured model, then the provider default
    pub llm_model: Option<String>,
}

/// Current page state sent by the browser driver each turn
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub url: String,
    #[serde(default)]
    pub browser_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_request_content_defaults_to_empty() {
        let req: CommandRequest =
            serde_json::from_str(r#"{"url":"https://example.com"}"#).unwrap();
        assert_eq!(req.url, "https://example.com");
        assert!(req.browser_content.is_empty());
    }

    #[test]
    fn test_create_session_optional_fields() {
        let req: CreateSessionRequest =
            serde_json::from_str(r#"{"objective":"book a flight"}"#).unwrap();
        assert_eq!(req.objective, "book a flight");
        assert!(req.llm_provider.is_none());
        assert!(req.llm_model.is_none());
    }
}
