//! Syllabus Domain Layer
//!
//! Core vocabulary shared by every other crate in the workspace. It has no
//! I/O and no framework dependencies; infrastructure lives in the other crates
//! and plugs in through the traits defined in [`traits`].
//!
//! ## Key Concepts
//!
//! - **Message**: a role-tagged unit of conversational context sent to a chat model
//! - **Objective**: one extracted learning-objective string
//! - **Embedding**: a fixed-length vector standing in for a piece of text
//! - **Scored label**: a reference label paired with its similarity score
//!
//! ## Collaborators
//!
//! - [`traits::ChatModel`]: stateless chat-completion call
//! - [`traits::EmbeddingProvider`]: text to vector
//! - [`traits::DocumentSource`]: raw document text
//! - [`traits::TabularSink`]: rectangular string tables

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod embedding;
pub mod message;
pub mod run;
pub mod scored;
pub mod traits;

// Re-exports for convenience
pub use embedding::{zero_embedding, Embedding, EMBEDDING_DIMENSION};
pub use message::{Message, Role};
pub use run::RunId;
pub use scored::ScoredLabel;
