//! OpenRouter Provider
//!
//! Chat-completions client for OpenRouter (or any API speaking the same
//! request and response shape).

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::provider::{LlmProvider, temperature};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Connection pool shared by every provider instance
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

const UNKNOWN_ERROR: &str = "Unknown error";

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat-completions response body; only the parts we read
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error body, e.g. `{"error": {"message": "Rate limit exceeded", "code": 429}}`
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Best-effort extraction of the service's error message
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|resp| resp.error)
        .and_then(|detail| detail.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

/// Pull the first choice's text out of a successful response body
fn first_choice_content(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Parse(e.to_string()))?;

    response
        .choices
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)
}

/// OpenRouter chat-completions provider
///
/// Only built when an API key is configured.
#[derive(Debug)]
pub struct OpenRouterProvider {
    api_key: String,
    completions_url: String,
    model: String,
    app_url: String,
    app_title: String,
    max_tokens: u32,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    fn build(api_key: String, config: &GeneratorConfig) -> Self {
        Self {
            api_key,
            completions_url: config.completions_url(),
            model: config.model.clone(),
            app_url: config.app_url.clone(),
            app_title: config.app_title.clone(),
            max_tokens: config.max_tokens,
            client: HTTP_CLIENT.clone(),
        }
    }

    /// Create a provider from configuration, or `None` when no key is set
    pub fn from_config(config: &GeneratorConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self::build(api_key, config))
    }

    /// Create a provider with an explicit key and otherwise default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::build(api_key.into(), &GeneratorConfig::default())
    }

    /// Use a specific model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    async fn complete(&self, prompt: &str, surprise: bool) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: temperature(surprise),
            max_tokens: self.max_tokens,
        };

        debug!(
            url = %self.completions_url,
            model = %self.model,
            temperature = request.temperature,
            "sending completion request"
        );

        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.app_url)
            .header("X-Title", &self.app_title)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            // An unreadable error body still reports the status.
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            warn!(status = status.as_u16(), %message, "completion endpoint returned an error");
            return Err(GenerationError::RemoteService {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        first_choice_content(&body)
    }

    fn provider_name(&self) -> &'static str {
        "openrouter"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
