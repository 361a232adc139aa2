//! Reference catalog of labelled competencies
//!
//! Stored as JSON:
//!
//! ```json
//! {
//!   "entries": [
//!     { "label": "PC1", "text": "Gather essential information about patients", "embedding": [0.01, -0.2] }
//!   ]
//! }
//! ```
//!
//! The label is what appears in match cells; the text is what gets embedded.

use crate::error::{MatcherError, Result};
use crate::vectorizer::Vectorizer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use syllabus_domain::traits::EmbeddingProvider;
use syllabus_domain::{zero_embedding, Embedding};
use tracing::{info, warn};

/// One reference entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Short label written into match cells
    pub label: String,

    /// Text that is embedded and compared
    pub text: String,

    /// Cached embedding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Embedding>,
}

impl CatalogEntry {
    /// Create an entry with no embedding yet
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            embedding: None,
        }
    }
}

/// Ordered collection of reference entries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    entries: Vec<CatalogEntry>,
}

impl ReferenceCatalog {
    /// Create a catalog, rejecting blank or duplicate labels
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let catalog = Self { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serialize the catalog to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write the catalog file
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.label.trim().is_empty() {
                return Err(MatcherError::Catalog(format!("entry {} has a blank label", i)));
            }
            if !seen.insert(entry.label.as_str()) {
                return Err(MatcherError::Catalog(format!(
                    "duplicate label '{}'",
                    entry.label
                )));
            }
        }
        Ok(())
    }

    /// Entries in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in catalog order
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.label.clone()).collect()
    }

    /// Number of entries without a cached embedding
    pub fn missing_embeddings(&self) -> usize {
        self.entries.iter().filter(|e| e.embedding.is_none()).count()
    }

    /// Embed every entry that has no cached embedding
    ///
    /// Failed embeddings are cached as zero vectors. Returns how many entries
    /// were embedded.
    pub fn embed_missing<E>(&mut self, vectorizer: &Vectorizer<E>) -> usize
    where
        E: EmbeddingProvider,
        E::Error: Display,
    {
        let mut embedded = 0;
        for entry in self.entries.iter_mut().filter(|e| e.embedding.is_none()) {
            entry.embedding = Some(vectorizer.embed_or_zero(&entry.text));
            embedded += 1;
        }
        info!(embedded, total = self.entries.len(), "catalog embeddings updated");
        embedded
    }

    /// One vector per entry, in catalog order
    ///
    /// Entries with no embedding, or one of the wrong length, contribute the
    /// zero vector.
    pub fn vectors(&self, dimension: usize) -> Vec<Embedding> {
        self.entries
            .iter()
            .map(|entry| match &entry.embedding {
                Some(v) if v.len() == dimension => v.clone(),
                Some(v) => {
                    warn!(label = %entry.label, expected = dimension, actual = v.len(), "catalog embedding has wrong dimension");
                    zero_embedding(dimension)
                }
                None => {
                    warn!(label = %entry.label, "catalog entry has no embedding");
                    zero_embedding(dimension)
                }
            })
            .collect()
    }
}
