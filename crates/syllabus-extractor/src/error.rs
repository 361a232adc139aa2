//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Model call failed
    #[error("LLM error: {0}")]
    Llm(String),

    /// Model call exceeded the per-chunk timeout
    #[error("Extraction timeout after {0}s")]
    Timeout(u64),

    /// Model reply could not be interpreted under the response protocol
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Document exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Document contains no text
    #[error("Document is empty")]
    EmptyDocument,

    /// A chunk failed under the abort policy
    #[error("Chunk {index} failed: {source}")]
    ChunkFailed {
        /// Zero-based chunk index
        index: usize,
        /// Underlying failure
        #[source]
        source: Box<ExtractorError>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ExtractorError {
    fn from(e: toml::de::Error) -> Self {
        ExtractorError::Config(format!("Failed to parse TOML: {}", e))
    }
}
