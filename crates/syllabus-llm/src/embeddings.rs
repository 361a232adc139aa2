//! Embedding providers
//!
//! - [`OpenAiEmbedder`]: `POST {base_url}/embeddings`, one text per call
//! - [`MockEmbedder`]: hash-based deterministic vectors for tests
//!
//! # Examples
//!
//! ```
//! use syllabus_llm::MockEmbedder;
//! use syllabus_domain::traits::EmbeddingProvider;
//!
//! let model = MockEmbedder::new(384);
//! let embedding = model.embed("The sky is blue").unwrap();
//! assert_eq!(embedding.len(), 384);
//!
//! // Same text always produces same embedding
//! assert_eq!(embedding, model.embed("The sky is blue").unwrap());
//! ```

use crate::openai::{backoff, build_client, is_retryable};
use crate::{lock, LlmConfig, LlmError};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};
use std::thread;
use syllabus_domain::traits::EmbeddingProvider;
use syllabus_domain::Embedding;
use tracing::warn;

/// Embedding client for OpenAI-compatible endpoints
pub struct OpenAiEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    dimension: usize,
    max_retries: u32,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    /// Create a client from explicit settings
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Config)?;
        let client = build_client(config)?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            model: config.embedding_model.clone(),
            dimension: config.embedding_dimension,
            max_retries: config.max_retries,
        })
    }

    /// Override the number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    fn request(&self, text: &str) -> Result<Embedding, LlmError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&self.endpoint).json(&body).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed: EmbeddingResponse = response.json().map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse embedding: {}", e))
                        })?;
                        return self.check_dimension(parsed);
                    }
                    let text = response
                        .text()
                        .unwrap_or_else(|_| "<body unavailable>".to_string());
                    let error = LlmError::Communication(format!("HTTP {}: {}", status, text));
                    if !is_retryable(status) {
                        return Err(error);
                    }
                    last_error = Some(error);
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = backoff(attempts);
                warn!(attempt = attempts, ?delay, "embedding request failed, retrying");
                thread::sleep(delay);
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    fn check_dimension(&self, response: EmbeddingResponse) -> Result<Embedding, LlmError> {
        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| LlmError::InvalidResponse("response contained no embedding".to_string()))?;

        if embedding.len() != self.dimension {
            return Err(LlmError::InvalidResponse(format!(
                "expected {} dimensions, got {}",
                self.dimension,
                embedding.len()
            )));
        }
        Ok(embedding)
    }
}

impl EmbeddingProvider for OpenAiEmbedder {
    type Error = LlmError;

    fn embed(&self, text: &str) -> Result<Embedding, Self::Error> {
        self.request(text)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Mock embedding model for deterministic testing
///
/// Vectors are derived from hashing the text with one seed per dimension and
/// normalizing to unit length, so the same text always maps to the same
/// vector. Specific texts can be configured to fail.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    dimension: usize,
    failing: Arc<Mutex<HashSet<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockEmbedder {
    /// Create a mock embedder with the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            failing: Arc::new(Mutex::new(HashSet::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Make `embed` fail for this exact text
    pub fn fail_on(&self, text: impl Into<String>) {
        lock(&self.failing).insert(text.into());
    }

    /// Number of embed calls received
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Hash text with a seed to get a deterministic value in [-1, 1]
    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(syllabus_domain::EMBEDDING_DIMENSION)
    }
}

impl EmbeddingProvider for MockEmbedder {
    type Error = LlmError;

    fn embed(&self, text: &str) -> Result<Embedding, Self::Error> {
        *lock(&self.call_count) += 1;

        if lock(&self.failing).contains(text) {
            return Err(LlmError::Communication(format!("mock failure for '{}'", text)));
        }
        if text.is_empty() {
            return Err(LlmError::InvalidResponse("Empty text cannot be embedded".to_string()));
        }

        let mut embedding: Vec<f32> = (0..self.dimension)
            .map(|i| Self::hash_with_seed(text, i as u64))
            .collect();

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_embedding_deterministic() {
        let model = MockEmbedder::new(64);
        let a = model.embed("Describe the anatomy of the heart").unwrap();
        let b = model.embed("Describe the anatomy of the heart").unwrap();
        assert_eq!(a, b);
        assert_eq!(model.call_count(), 2);
    }

    #[test]
    fn test_mock_embedding_normalized() {
        let model = MockEmbedder::new(128);
        let embedding = model.embed("test text").unwrap();
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_mock_embedding_default_dimension() {
        let model = MockEmbedder::default();
        assert_eq!(model.dimension(), 1536);
        assert_eq!(model.embed("x").unwrap().len(), 1536);
    }

    #[test]
    fn test_mock_embedding_failures() {
        let model = MockEmbedder::new(8);
        model.fail_on("broken");
        assert!(model.embed("broken").is_err());
        assert!(model.embed("").is_err());
        assert!(model.embed("fine").is_ok());
    }

    #[test]
    fn test_openai_embedder_creation() {
        let embedder = OpenAiEmbedder::new(&LlmConfig::with_api_key("sk-test")).unwrap();
        assert_eq!(embedder.endpoint, "https://api.openai.com/v1/embeddings");
        assert_eq!(embedder.dimension(), 1536);
    }

    #[test]
    fn test_dimension_check() {
        let mut config = LlmConfig::with_api_key("sk-test");
        config.embedding_dimension = 3;
        let embedder = OpenAiEmbedder::new(&config).unwrap();

        let ok: EmbeddingResponse =
            serde_json::from_str(r#"{"data":[{"embedding":[0.1,0.2,0.3]}]}"#).unwrap();
        assert_eq!(embedder.check_dimension(ok).unwrap().len(), 3);

        let short: EmbeddingResponse =
            serde_json::from_str(r#"{"data":[{"embedding":[0.1]}]}"#).unwrap();
        assert!(matches!(
            embedder.check_dimension(short),
            Err(LlmError::InvalidResponse(_))
        ));

        let empty: EmbeddingResponse = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(embedder.check_dimension(empty).is_err());
    }
}
