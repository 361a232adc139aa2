//! Error types for matching

use thiserror::Error;

/// Errors that can occur while embedding, matching, or reporting
#[derive(Error, Debug)]
pub enum MatcherError {
    /// Two vectors of different length were compared
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Length of the first vector
        expected: usize,
        /// Length of the second vector
        actual: usize,
    },

    /// Two parallel lists have different lengths
    #[error("Length mismatch: {left} {what} vs {right}")]
    LengthMismatch {
        /// What was being paired
        what: &'static str,
        /// Length of the first list
        left: usize,
        /// Length of the second list
        right: usize,
    },

    /// Threshold outside the range of cosine similarity
    #[error("Invalid threshold: {0} (must be within [-1, 1])")]
    InvalidThreshold(f32),

    /// Reference catalog is malformed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// I/O error while reading or writing a catalog
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for matcher operations
pub type Result<T> = std::result::Result<T, MatcherError>;
