//! Connection settings for model providers

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenAI-compatible API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat-completion model
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default sampling temperature for extraction
pub const DEFAULT_TEMPERATURE: f32 = 0.25;

/// Default timeout for a single HTTP request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Settings shared by the chat and embedding clients
///
/// Passed explicitly to each client constructor; there is no process-wide
/// credential state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Bearer token for the provider
    #[serde(default)]
    pub api_key: String,

    /// API base URL, without a trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chat-completion model name
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Sampling temperature for chat completions
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Expected embedding dimension
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl LlmConfig {
    /// Default settings with the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Longest a single call can take: every attempt timing out, plus the
    /// backoff sleeps between attempts
    pub fn retry_budget(&self) -> Duration {
        let attempts = self.max_retries.max(1);
        let backoff: Duration = (1..attempts).map(crate::openai::backoff).sum();
        self.timeout() * attempts + backoff
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("api_key is required".to_string());
        }
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if self.chat_model.trim().is_empty() {
            return Err("chat_model must not be empty".to_string());
        }
        if self.embedding_model.trim().is_empty() {
            return Err("embedding_model must not be empty".to_string());
        }
        if self.embedding_dimension == 0 {
            return Err("embedding_dimension must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature {} out of range [0.0, 2.0]", self.temperature));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            temperature: default_temperature(),
            embedding_model: default_embedding_model(),
            embedding_dimension: default_embedding_dimension(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_embedding_dimension() -> usize {
    syllabus_domain::EMBEDDING_DIMENSION
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_requires_api_key() {
        assert!(LlmConfig::default().validate().is_err());
        assert!(LlmConfig::with_api_key("sk-test").validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.embedding_model, "text-embedding-3-small");
        assert_eq!(config.embedding_dimension, 1536);
        assert!((config.temperature - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_retry_budget() {
        // 3 x 60s attempts + 1s + 2s backoff
        assert_eq!(LlmConfig::default().retry_budget(), Duration::from_secs(183));

        let config = LlmConfig {
            timeout_secs: 10,
            max_retries: 1,
            ..LlmConfig::default()
        };
        assert_eq!(config.retry_budget(), Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_temperature() {
        let mut config = LlmConfig::with_api_key("sk-test");
        config.temperature = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: LlmConfig = toml::from_str("api_key = \"sk-test\"\nchat_model = \"gpt-4o\"").unwrap();
        assert_eq!(config.chat_model, "gpt-4o");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    }
}
