//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output table already exists
    #[error("Output table '{0}' already exists; delete or rename it first")]
    OutputExists(String),

    /// Table not found
    #[error("Table '{0}' not found; run the step that produces it first")]
    TableNotFound(String),

    /// Extraction error
    #[error(transparent)]
    Extractor(#[from] syllabus_extractor::ExtractorError),

    /// Matching error
    #[error(transparent)]
    Matcher(#[from] syllabus_matcher::MatcherError),

    /// Model provider error
    #[error(transparent)]
    Llm(#[from] syllabus_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
