//! OpenAI-compatible chat-completion client
//!
//! Blocking HTTP client for `POST {base_url}/chat/completions`.
//!
//! # Features
//!
//! - Bearer authentication from an explicit [`LlmConfig`]
//! - Retry with exponential backoff on rate limits, server errors and
//!   connection failures
//! - Per-request timeout
//!
//! The client blocks the calling thread. Async callers must run it on a
//! blocking thread (e.g. `tokio::task::spawn_blocking`).

use crate::{LlmConfig, LlmError};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use syllabus_domain::traits::ChatModel;
use syllabus_domain::Message;
use tracing::{debug, warn};

/// Chat-completion client for OpenAI-compatible endpoints
pub struct OpenAiChatModel {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiChatModel {
    /// Create a client from explicit settings
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the settings are invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Config)?;
        let client = build_client(config)?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.chat_model.clone(),
            temperature: config.temperature,
            max_retries: config.max_retries,
        })
    }

    /// Override the number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Send one chat-completion request and return the trimmed reply text
    pub fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&self.endpoint).json(&body).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed: ChatResponse = response.json().map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        return extract_content(parsed);
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    }
                    let text = response
                        .text()
                        .unwrap_or_else(|_| "<body unavailable>".to_string());
                    if !is_retryable(status) {
                        return Err(LlmError::Communication(format!("HTTP {}: {}", status, text)));
                    }
                    last_error = Some(if status == StatusCode::TOO_MANY_REQUESTS {
                        LlmError::RateLimitExceeded
                    } else {
                        LlmError::Communication(format!("HTTP {}: {}", status, text))
                    });
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = backoff(attempts);
                warn!(attempt = attempts, ?delay, "chat completion failed, retrying");
                thread::sleep(delay);
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl ChatModel for OpenAiChatModel {
    type Error = LlmError;

    fn complete(&self, messages: &[Message]) -> Result<String, Self::Error> {
        debug!(model = %self.model, messages = messages.len(), "sending chat completion");
        self.chat(messages)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Build a blocking HTTP client with auth headers and timeout
pub(crate) fn build_client(config: &LlmConfig) -> Result<Client, LlmError> {
    let mut headers = HeaderMap::new();
    let auth = format!("Bearer {}", config.api_key.trim());
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&auth).map_err(|_| LlmError::Config("invalid API key".to_string()))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Client::builder()
        .timeout(config.timeout())
        .default_headers(headers)
        .build()
        .map_err(|e| LlmError::Config(format!("failed to build HTTP client: {}", e)))
}

/// Rate limits and server errors are worth another attempt
pub(crate) fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Exponential backoff: 1s, 2s, 4s, ... capped at 32s
pub(crate) fn backoff(attempt: u32) -> Duration {
    let capped = attempt.saturating_sub(1).min(5);
    Duration::from_secs(1u64 << capped)
}

fn extract_content(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| LlmError::InvalidResponse("response contained no message content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LlmConfig {
        LlmConfig::with_api_key("sk-test")
    }

    #[test]
    fn test_chat_model_creation() {
        let model = OpenAiChatModel::new(&test_config()).unwrap();
        assert_eq!(model.endpoint, "https://api.openai.com/v1/chat/completions");
        assert_eq!(model.model_name(), "gpt-4o-mini");
        assert_eq!(model.max_retries, 3);
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let mut config = test_config();
        config.base_url = "http://localhost:8000/v1/".to_string();
        let model = OpenAiChatModel::new(&config).unwrap();
        assert_eq!(model.endpoint, "http://localhost:8000/v1/chat/completions");
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let result = OpenAiChatModel::new(&LlmConfig::default());
        assert!(matches!(result, Err(LlmError::Config(_))));
    }

    #[test]
    fn test_with_max_retries_floor() {
        let model = OpenAiChatModel::new(&test_config()).unwrap().with_max_retries(0);
        assert_eq!(model.max_retries, 1);
    }

    #[test]
    fn test_backoff_schedule() {
        assert_eq!(backoff(1), Duration::from_secs(1));
        assert_eq!(backoff(2), Duration::from_secs(2));
        assert_eq!(backoff(3), Duration::from_secs(4));
        assert_eq!(backoff(50), Duration::from_secs(32));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_extract_content_trims() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  NULL \n"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(parsed).unwrap(), "NULL");
    }

    #[test]
    fn test_extract_content_without_choices() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_content(parsed), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_unreachable_endpoint_is_communication_error() {
        let mut config = test_config();
        config.base_url = "http://127.0.0.1:9".to_string();
        config.timeout_secs = 2;
        let model = OpenAiChatModel::new(&config).unwrap().with_max_retries(1);

        let result = model.complete(&[Message::user("test")]);
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
