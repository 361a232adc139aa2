//! Embedding with a zero-vector fallback
//!
//! Any failure to produce an embedding (transport error, malformed reply,
//! wrong length) yields the zero vector of the provider's dimension. Callers
//! never see a missing vector; similarity against the placeholder is 0.

use std::fmt::Display;
use syllabus_domain::traits::EmbeddingProvider;
use syllabus_domain::{zero_embedding, Embedding};
use tracing::{debug, warn};

/// Wraps an [`EmbeddingProvider`] with the fallback policy
pub struct Vectorizer<E> {
    provider: E,
    dimension: usize,
}

/// Embeddings for a batch of texts, in input order
#[derive(Debug, Clone)]
pub struct EmbeddedBatch {
    /// One vector per input text
    pub vectors: Vec<Embedding>,
    /// Indices of texts that fell back to the zero vector
    pub fallbacks: Vec<usize>,
}

impl<E> Vectorizer<E>
where
    E: EmbeddingProvider,
    E::Error: Display,
{
    /// Create a vectorizer; the dimension is taken from the provider
    pub fn new(provider: E) -> Self {
        let dimension = provider.dimension();
        Self {
            provider,
            dimension,
        }
    }

    /// Dimension of every vector produced
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed one text, or `None` on any failure
    pub fn embed(&self, text: &str) -> Option<Embedding> {
        match self.provider.embed(text) {
            Ok(vector) if vector.len() == self.dimension => Some(vector),
            Ok(vector) => {
                warn!(
                    expected = self.dimension,
                    actual = vector.len(),
                    "embedding has wrong dimension"
                );
                None
            }
            Err(e) => {
                warn!(error = %e, "embedding request failed");
                None
            }
        }
    }

    /// Embed one text, substituting the zero vector on failure
    pub fn embed_or_zero(&self, text: &str) -> Embedding {
        self.embed(text)
            .unwrap_or_else(|| zero_embedding(self.dimension))
    }

    /// Embed every text in order
    pub fn embed_all<S: AsRef<str>>(&self, texts: &[S]) -> EmbeddedBatch {
        let mut vectors = Vec::with_capacity(texts.len());
        let mut fallbacks = Vec::new();

        for (i, text) in texts.iter().enumerate() {
            match self.embed(text.as_ref()) {
                Some(v) => vectors.push(v),
                None => {
                    fallbacks.push(i);
                    vectors.push(zero_embedding(self.dimension));
                }
            }
        }

        if fallbacks.is_empty() {
            debug!(count = texts.len(), "embedded batch");
        } else {
            warn!(
                count = texts.len(),
                fallbacks = fallbacks.len(),
                "embedded batch with zero-vector fallbacks"
            );
        }

        EmbeddedBatch { vectors, fallbacks }
    }
}

/// Decode an embedding stored as a JSON array of numbers
///
/// Malformed JSON or a vector of the wrong length decodes to the zero vector.
///
/// # Examples
///
/// ```
/// use syllabus_matcher::parse_stored_embedding;
///
/// assert_eq!(parse_stored_embedding("[0.5, 0.25]", 2), vec![0.5, 0.25]);
/// assert_eq!(parse_stored_embedding("not json", 2), vec![0.0, 0.0]);
/// assert_eq!(parse_stored_embedding("[1.0]", 2), vec![0.0, 0.0]);
/// ```
pub fn parse_stored_embedding(raw: &str, dimension: usize) -> Embedding {
    match serde_json::from_str::<Vec<f32>>(raw) {
        Ok(vector) if vector.len() == dimension => vector,
        Ok(vector) => {
            warn!(expected = dimension, actual = vector.len(), "stored embedding has wrong dimension");
            zero_embedding(dimension)
        }
        Err(e) => {
            warn!(error = %e, "stored embedding is not valid JSON");
            zero_embedding(dimension)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_domain::embedding::is_zero;
    use syllabus_llm::MockEmbedder;

    #[test]
    fn test_embed_passes_through() {
        let vectorizer = Vectorizer::new(MockEmbedder::new(8));
        let v = vectorizer.embed_or_zero("Describe the heart");
        assert_eq!(v.len(), 8);
        assert!(!is_zero(&v));
    }

    #[test]
    fn test_failure_falls_back_to_zero() {
        let embedder = MockEmbedder::new(8);
        embedder.fail_on("broken");
        let vectorizer = Vectorizer::new(embedder);

        assert!(vectorizer.embed("broken").is_none());
        let v = vectorizer.embed_or_zero("broken");
        assert_eq!(v, vec![0.0; 8]);
    }

    #[test]
    fn test_embed_all_records_fallbacks() {
        let embedder = MockEmbedder::new(4);
        embedder.fail_on("b");
        let vectorizer = Vectorizer::new(embedder.clone());

        let batch = vectorizer.embed_all(&["a", "b", "c"]);
        assert_eq!(batch.vectors.len(), 3);
        assert_eq!(batch.fallbacks, vec![1]);
        assert!(is_zero(&batch.vectors[1]));
        assert!(!is_zero(&batch.vectors[2]));
        assert_eq!(embedder.call_count(), 3);
    }

    #[test]
    fn test_parse_stored_embedding_fallbacks() {
        assert_eq!(parse_stored_embedding("", 3), vec![0.0; 3]);
        assert_eq!(parse_stored_embedding("[1, 2, \"x\"]", 3), vec![0.0; 3]);
        assert_eq!(parse_stored_embedding("[1, 2, 3]", 3), vec![1.0, 2.0, 3.0]);
    }
}
