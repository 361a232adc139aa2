//! Syllabus Matcher
//!
//! Compares extracted objectives with a reference catalog by embedding
//! similarity.
//!
//! # Components
//!
//! - [`cosine_similarity`]: pure similarity over equal-length vectors
//! - [`Vectorizer`]: embedding with a zero-vector fallback on any failure
//! - [`Matcher`]: source × target cross-join with a threshold, producing a
//!   rectangular [`MatchTable`]
//! - [`ReferenceCatalog`]: labelled reference entries with cached embeddings
//! - [`AlignmentReport`]: band counts, best-aligned and unmatched objectives
//!
//! # Example
//!
//! ```
//! use syllabus_matcher::{Matcher, Vectorizer};
//! use syllabus_llm::MockEmbedder;
//!
//! let vectorizer = Vectorizer::new(MockEmbedder::new(64));
//! let sources = vectorizer.embed_all(&["Describe the heart"]).vectors;
//! let targets = vectorizer.embed_all(&["Describe the heart", "File taxes"]).vectors;
//! let labels = vec!["MK1".to_string(), "TAX".to_string()];
//!
//! let table = Matcher::default().match_vectors(&sources, &targets, &labels).unwrap();
//! assert_eq!(table.rows()[0][0].label, "MK1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod error;
pub mod matcher;
pub mod report;
pub mod similarity;
pub mod vectorizer;

pub use catalog::{CatalogEntry, ReferenceCatalog};
pub use error::{MatcherError, Result};
pub use matcher::{MatchTable, Matcher, DEFAULT_THRESHOLD};
pub use report::{default_bands, AlignmentReport, LabelCoverage, QualityBand, ReportSummary};
pub use similarity::cosine_similarity;
pub use vectorizer::{parse_stored_embedding, EmbeddedBatch, Vectorizer};
