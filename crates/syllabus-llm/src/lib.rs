//! Syllabus LLM Provider Layer
//!
//! Implementations of the [`ChatModel`] and [`EmbeddingProvider`] traits from
//! `syllabus-domain`.
//!
//! # Providers
//!
//! - [`MockChatModel`]: scripted chat responses for testing
//! - [`MockEmbedder`]: deterministic hash-based embeddings for testing
//! - [`OpenAiChatModel`]: OpenAI-compatible chat completions
//! - [`OpenAiEmbedder`]: OpenAI-compatible embeddings
//!
//! # Examples
//!
//! ```
//! use syllabus_llm::MockChatModel;
//! use syllabus_domain::{traits::ChatModel, Message};
//!
//! let model = MockChatModel::new("NULL");
//! model.push_response("Describe the heart");
//!
//! let messages = [Message::user("chunk text")];
//! assert_eq!(model.complete(&messages).unwrap(), "Describe the heart");
//! assert_eq!(model.complete(&messages).unwrap(), "NULL");
//! assert_eq!(model.call_count(), 2);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod embeddings;
pub mod openai;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use syllabus_domain::traits::ChatModel;
use syllabus_domain::Message;
use thiserror::Error;

pub use config::LlmConfig;
pub use embeddings::{MockEmbedder, OpenAiEmbedder};
pub use openai::OpenAiChatModel;

/// Errors that can occur during model operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response arrived but could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded after all retries
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available at the endpoint
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// One scripted outcome for [`MockChatModel`]
#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(String),
}

/// Mock chat model for deterministic testing
///
/// Responses are resolved in this order:
///
/// 1. the next entry of the script queue (`push_response` / `push_error`)
/// 2. a response keyed by the content of the last message (`add_response`)
/// 3. the default response
///
/// Every message list received is recorded and can be inspected with
/// [`MockChatModel::calls`]. Clones share state.
#[derive(Debug, Clone)]
pub struct MockChatModel {
    default_response: String,
    script: Arc<Mutex<VecDeque<Scripted>>>,
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockChatModel {
    /// Create a mock that answers every call with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that answers calls in order with the given responses,
    /// then falls back to `"NULL"`
    pub fn scripted<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let model = Self::new("NULL");
        for response in responses {
            model.push_response(response);
        }
        model
    }

    /// Queue a response for the next unanswered call
    pub fn push_response(&self, response: impl Into<String>) {
        lock(&self.script).push_back(Scripted::Reply(response.into()));
    }

    /// Queue a failure for the next unanswered call
    pub fn push_error(&self, reason: impl Into<String>) {
        lock(&self.script).push_back(Scripted::Fail(reason.into()));
    }

    /// Answer `response` whenever the last message has exactly this content
    pub fn add_response(&self, last_message: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(last_message.into(), response.into());
    }

    /// Number of calls received
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Message lists received, in call order
    pub fn calls(&self) -> Vec<Vec<Message>> {
        lock(&self.calls).clone()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new("NULL")
    }
}

impl ChatModel for MockChatModel {
    type Error = LlmError;

    fn complete(&self, messages: &[Message]) -> Result<String, Self::Error> {
        lock(&self.calls).push(messages.to_vec());

        if let Some(next) = lock(&self.script).pop_front() {
            return match next {
                Scripted::Reply(text) => Ok(text),
                Scripted::Fail(reason) => Err(LlmError::Communication(reason)),
            };
        }

        if let Some(last) = messages.last() {
            if let Some(response) = lock(&self.responses).get(&last.content) {
                return Ok(response.clone());
            }
        }

        Ok(self.default_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

/// Lock a mutex, recovering the data if a panicking test poisoned it
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
