use std::collections::HashMap;

use crate::config;
use crate::error::{AppError, Result};
use crate::llm::prompts::{format_prompt, truncate_chars, MAX_BROWSER_CONTENT_CHARS, MAX_URL_CHARS};
use crate::llm::{CompletionBackend, LLMProvider, OpenAICompletionClient, SamplingParams};

pub const DEFAULT_URL_KEY: &str = "url";
pub const DEFAULT_BROWSER_CONTENT_KEY: &str = "browser_content";
pub const DEFAULT_OUTPUT_KEY: &str = "command";

/// Turns the current page into the next browser command.
///
/// Holds the objective and the last command it produced. Each call renders
/// one prompt, asks the backend once, and remembers the trimmed answer so
/// the following prompt can show it as `PREVIOUS COMMAND`.
pub struct CommandGenerator {
    objective: String,
    backend: Box<dyn CompletionBackend>,
    previous_command: String,
    input_url_key: String,
    input_browser_content_key: String,
    output_key: String,
}

impl CommandGenerator {
    pub fn new(objective: impl Into<String>, backend: Box<dyn CompletionBackend>) -> Self {
        Self {
            objective: objective.into(),
            backend,
            previous_command: String::new(),
            input_url_key: DEFAULT_URL_KEY.to_string(),
            input_browser_content_key: DEFAULT_BROWSER_CONTENT_KEY.to_string(),
            output_key: DEFAULT_OUTPUT_KEY.to_string(),
        }
    }

    /// Use the OpenAI completions endpoint with the default sampling params
    pub fn from_default(objective: impl Into<String>) -> Result<Self> {
        let provider = LLMProvider::OpenAI;
        let api_key = config::get_api_key(provider)
            .ok_or_else(|| AppError::MissingApiKey(provider.api_key_env_var().to_string()))?;
        let backend = OpenAICompletionClient::new(api_key, SamplingParams::default());
        Ok(Self::new(objective, Box::new(backend)))
    }

    /// Rename the keys read by [`CommandGenerator::call`]
    pub fn with_input_keys(
        mut self,
        url_key: impl Into<String>,
        browser_content_key: impl Into<String>,
    ) -> Self {
        self.input_url_key = url_key.into();
        self.input_browser_content_key = browser_content_key.into();
        self
    }

    /// Rename the key written by [`CommandGenerator::call`]
    pub fn with_output_key(mut self, output_key: impl Into<String>) -> Self {
        self.output_key = output_key.into();
        self
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }

    /// Last command returned by a successful run, empty before the first one
    pub fn previous_command(&self) -> &str {
        &self.previous_command
    }

    pub fn input_keys(&self) -> Vec<String> {
        vec![
            self.input_url_key.clone(),
            self.input_browser_content_key.clone(),
        ]
    }

    pub fn output_keys(&self) -> Vec<String> {
        vec![self.output_key.clone()]
    }

    /// The prompt the next run would send for this page
    pub fn prompt_for(&self, url: &str, browser_content: &str) -> String {
        format_prompt(
            &self.objective,
            truncate_chars(url, MAX_URL_CHARS),
            &self.previous_command,
            truncate_chars(browser_content, MAX_BROWSER_CONTENT_CHARS),
        )
    }

    /// Produce the next command for the page at `url`.
    ///
    /// Backend errors are returned untouched and leave the previous command
    /// as it was.
    pub async fn run(&mut self, url: &str, browser_content: &str) -> Result<String> {
        tracing::debug!(
            "Generating command (url: {} chars, content: {} chars)",
            url.chars().count(),
            browser_content.chars().count()
        );

        let prompt = self.prompt_for(url, browser_content);
        let raw = self.backend.complete(&prompt).await?;

        let command = raw.trim().to_string();
        self.previous_command = command.clone();

        tracing::debug!("Generated command: {:?}", command);
        Ok(command)
    }

    /// Key/value form of [`CommandGenerator::run`]
    pub async fn call(&mut self, inputs: &HashMap<String, String>) -> Result<HashMap<String, String>> {
        let url = inputs
            .get(&self.input_url_key)
            .ok_or_else(|| AppError::MissingInput(self.input_url_key.clone()))?;
        let browser_content = inputs
            .get(&self.input_browser_content_key)
            .ok_or_else(|| AppError::MissingInput(self.input_browser_content_key.clone()))?;

        let command = self.run(url, browser_content).await?;

        let mut outputs = HashMap::new();
        outputs.insert(self.output_key.clone(), command);
        Ok(outputs)
    }
}

impl std::fmt::Debug for CommandGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandGenerator")
            .field("objective", &self.objective)
            .field("previous_command", &self.previous_command)
            .field("input_keys", &self.input_keys())
            .field("output_key", &self.output_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tokio_test::{assert_err, assert_ok};

    /// Replays canned answers and records every prompt it sees
    struct ScriptedBackend {
        replies: Mutex<VecDeque<std::result::Result<String, String>>>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedBackend {
        fn new(
            replies: Vec<std::result::Result<&str, &str>>,
        ) -> (Self, Arc<Mutex<Vec<String>>>) {
            let prompts = Arc::new(Mutex::new(Vec::new()));
            let backend = Self {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
                prompts: Arc::clone(&prompts),
            };
            (backend, prompts)
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(AppError::LLMError(message)),
                None => Err(AppError::LLMError("script exhausted".to_string())),
            }
        }
    }

    fn generator(
        replies: Vec<std::result::Result<&str, &str>>,
    ) -> (CommandGenerator, Arc<Mutex<Vec<String>>>) {
        let (backend, prompts) = ScriptedBackend::new(replies);
        (
            CommandGenerator::new("book a flight", Box::new(backend)),
            prompts,
        )
    }

    #[test]
    fn test_starts_with_empty_previous_command() {
        let (bot, _) = generator(vec![]);
        assert_eq!(bot.previous_command(), "");
        assert_eq!(bot.objective(), "book a flight");
    }

    #[tokio::test]
    async fn test_run_trims_and_remembers() {
        let (mut bot, prompts) = generator(vec![Ok("  CLICK 12  ")]);
        let content = "<link id=12>Search flights</link> and some more..";

        let command = assert_ok!(bot.run("https://airline.example/search", content).await);

        assert_eq!(command, "CLICK 12");
        assert_eq!(bot.previous_command(), "CLICK 12");

        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("OBJECTIVE: book a flight"));
        assert!(prompts[0].contains("CURRENT URL: https://airline.example/search\n"));
        assert!(prompts[0].contains("PREVIOUS COMMAND: \n"));
        assert!(prompts[0].contains(content));
    }

    #[tokio::test]
    async fn test_next_prompt_embeds_previous_command() {
        let (mut bot, prompts) = generator(vec![Ok("TYPESUBMIT 8 \"flights\"\n"), Ok("CLICK 24")]);

        assert_ok!(bot.run("https://www.google.com/", "<input id=8/>").await);
        assert_ok!(bot.run("https://www.google.com/search", "<link id=24/>").await);

        let prompts = prompts.lock().unwrap();
        assert!(prompts[1].contains("PREVIOUS COMMAND: TYPESUBMIT 8 \"flights\"\n"));
        assert_eq!(bot.previous_command(), "CLICK 24");
    }

    #[tokio::test]
    async fn test_long_url_is_cut_to_100_chars() {
        let (mut bot, prompts) = generator(vec![Ok("SCROLL DOWN")]);
        let url = format!("https://airline.example/{}", "q".repeat(126));
        assert_eq!(url.chars().count(), 150);

        assert_ok!(bot.run(&url, "<text id=1>hi</text>").await);

        let prompt = &prompts.lock().unwrap()[0];
        assert!(prompt.contains(&format!("CURRENT URL: {}\n", &url[..100])));
        assert!(!prompt.contains(&url[..101]));
    }

    #[tokio::test]
    async fn test_long_content_is_cut_to_4500_chars() {
        let (mut bot, prompts) = generator(vec![Ok("SCROLL DOWN")]);
        let content = format!("{}{}", "a".repeat(4500), "Z".repeat(500));

        assert_ok!(bot.run("https://example.com", &content).await);

        let prompt = &prompts.lock().unwrap()[0];
        assert!(prompt.contains(&format!("{}\n------", "a".repeat(4500))));
        assert!(!prompt.contains("aZ"));
    }

    #[tokio::test]
    async fn test_backend_error_keeps_previous_command() {
        let (mut bot, _) = generator(vec![Ok("CLICK 3"), Err("quota exceeded")]);

        assert_ok!(bot.run("https://example.com", "page").await);
        let err = assert_err!(bot.run("https://example.com", "page").await);

        assert!(matches!(&err, AppError::LLMError(m) if m == "quota exceeded"));
        assert_eq!(bot.previous_command(), "CLICK 3");
    }

    #[tokio::test]
    async fn test_call_uses_keys() {
        let (bot, _) = generator(vec![Ok(" SCROLL UP ")]);
        let mut bot = bot
            .with_input_keys("page_url", "page_text")
            .with_output_key("next");

        assert_eq!(bot.input_keys(), vec!["page_url", "page_text"]);
        assert_eq!(bot.output_keys(), vec!["next"]);

        let inputs = HashMap::from([
            ("page_url".to_string(), "https://example.com".to_string()),
            ("page_text".to_string(), "<text id=1>hi</text>".to_string()),
        ]);
        let outputs = assert_ok!(bot.call(&inputs).await);

        assert_eq!(outputs.get("next").map(String::as_str), Some("SCROLL UP"));
        assert_eq!(bot.previous_command(), "SCROLL UP");
    }

    #[tokio::test]
    async fn test_call_missing_input() {
        let (mut bot, prompts) = generator(vec![Ok("CLICK 1")]);
        let inputs = HashMap::from([("url".to_string(), "https://example.com".to_string())]);

        let err = assert_err!(bot.call(&inputs).await);

        assert!(matches!(&err, AppError::MissingInput(k) if k == "browser_content"));
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_default_keys() {
        let (bot, _) = generator(vec![]);
        assert_eq!(bot.input_keys(), vec!["url", "browser_content"]);
        assert_eq!(bot.output_keys(), vec!["command"]);
    }
}
