//! Syllabus Extractor
//!
//! Turns long, irregularly formatted documents into an ordered list of
//! learning-objective strings by querying a chat model one chunk at a time.
//!
//! # Architecture
//!
//! ```text
//! Document → TextChunker → chunks → ExtractionSession ⇄ ChatModel → objectives
//! ```
//!
//! The model is stateless between calls. Every chunk is sent with the same
//! [`PrimingSet`] prefix, and all cross-chunk state (the carry buffer holding
//! an objective split by a chunk cut) lives in the [`ExtractionSession`].
//!
//! Replies follow a small in-band protocol described in [`protocol`]:
//! `|`-separated objectives, a `CONCATNEXT` suffix for an incomplete one,
//! `NULL` for nothing found, and a stop signal that ends the run.
//!
//! # Failure policy
//!
//! A failed model call or an unusable reply affects only its own chunk. Under
//! [`FailurePolicy::SkipChunk`] (the default) the chunk is logged and
//! treated as empty, and the carry buffer is left as it was. Under
//! [`FailurePolicy::Abort`] the run returns [`ExtractorError::ChunkFailed`].
//! Configuration and size errors are raised before any model call.
//!
//! # Example Usage
//!
//! ```
//! use syllabus_extractor::{Extractor, ExtractorConfig, PrimingSet};
//! use syllabus_llm::MockChatModel;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let model = MockChatModel::scripted(["Describe the heart | Explain disease"]);
//! let extractor = Extractor::new(model, PrimingSet::default(), ExtractorConfig::default())?;
//!
//! let result = extractor.extract("Students will: 1. Describe the heart 2. Explain disease").await?;
//! assert_eq!(result.objectives, vec!["Describe the heart", "Explain disease"]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod prompt;
pub mod protocol;
mod session;
mod types;


pub use chunking::{Chunk, Chunks, TextChunker};
pub use config::{ExtractorConfig, FailurePolicy, DEFAULT_CHUNK_SIZE, DEFAULT_STOP_SIGNAL};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use prompt::{PrimingSet, INPUT_CLOSE, INPUT_OPEN};
pub use session::{ExtractionSession, SessionOutcome, SessionState};
pub use types::{ChunkFailure, ExtractionMetadata, ExtractionResult};
