//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction/matching logic
//! and infrastructure. Implementations live in other crates.

use crate::{Embedding, Message};

/// Stateless chat-completion endpoint
///
/// Implemented by the infrastructure layer (syllabus-llm). Every call carries
/// the full message list; nothing is remembered between calls.
pub trait ChatModel {
    /// Error type for model calls
    type Error;

    /// Send the messages and return the model's reply text
    ///
    /// Blocking from the caller's point of view. Failures must be returned,
    /// never panicked.
    fn complete(&self, messages: &[Message]) -> Result<String, Self::Error>;

    /// Name of the underlying model, for run metadata
    fn model_name(&self) -> &str;
}

/// Text-to-vector embedding service
///
/// Implemented by the infrastructure layer (syllabus-llm)
pub trait EmbeddingProvider {
    /// Error type for embedding calls
    type Error;

    /// Generate an embedding for the text
    fn embed(&self, text: &str) -> Result<Embedding, Self::Error>;

    /// Dimension of vectors produced by this provider
    fn dimension(&self) -> usize;
}

/// Supplier of raw document text
///
/// Implemented by the application layer (syllabus-cli)
pub trait DocumentSource {
    /// Error type for reads
    type Error;

    /// Fetch the plain text behind a document reference
    fn read_text(&self, reference: &str) -> Result<String, Self::Error>;
}

/// Destination for rectangular string tables
///
/// Implemented by the application layer (syllabus-cli)
pub trait TabularSink {
    /// Error type for writes
    type Error;

    /// Whether a table with this name already exists
    fn exists(&self, table: &str) -> Result<bool, Self::Error>;

    /// Write a table; every row in `rows` has the same length as `header`
    fn write_table(
        &mut self,
        table: &str,
        header: &[String],
        rows: &[Vec<String>],
    ) -> Result<(), Self::Error>;

    /// Read a previously written table back (header excluded)
    fn read_table(&self, table: &str) -> Result<Vec<Vec<String>>, Self::Error>;
}
