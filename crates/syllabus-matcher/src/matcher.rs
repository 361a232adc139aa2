//! Threshold matching of source vectors against labelled targets

use crate::error::{MatcherError, Result};
use crate::similarity::cosine_similarity;
use syllabus_domain::{Embedding, ScoredLabel};
use tracing::info;

/// Default similarity threshold for a match
pub const DEFAULT_THRESHOLD: f32 = 0.50;

/// Cell value of the status column when a row has at least one match
pub const MATCHED: &str = "Y";

/// Cell value of the status column when a row has no matches
pub const UNMATCHED: &str = "N";

/// Cross-joins source vectors with target vectors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matcher {
    threshold: f32,
}

impl Matcher {
    /// Create a matcher
    ///
    /// # Errors
    ///
    /// [`MatcherError::InvalidThreshold`] unless `threshold` is a finite
    /// number within [-1, 1].
    pub fn new(threshold: f32) -> Result<Self> {
        if !threshold.is_finite() || !(-1.0..=1.0).contains(&threshold) {
            return Err(MatcherError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    /// Minimum score kept as a match
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Compare every source against every target
    ///
    /// Produces one row per source, in source order. A row holds the labels
    /// of targets scoring at or above the threshold, in target order.
    ///
    /// # Errors
    ///
    /// [`MatcherError::LengthMismatch`] if `labels` and `targets` differ in
    /// length; [`MatcherError::DimensionMismatch`] if any two vectors differ
    /// in length.
    pub fn match_vectors(
        &self,
        sources: &[Embedding],
        targets: &[Embedding],
        labels: &[String],
    ) -> Result<MatchTable> {
        if targets.len() != labels.len() {
            return Err(MatcherError::LengthMismatch {
                what: "target vectors and labels",
                left: targets.len(),
                right: labels.len(),
            });
        }

        let mut rows = Vec::with_capacity(sources.len());
        for source in sources {
            let mut row = Vec::new();
            for (target, label) in targets.iter().zip(labels) {
                let score = cosine_similarity(source, target)?;
                if score >= self.threshold {
                    row.push(ScoredLabel::new(label.clone(), score));
                }
            }
            rows.push(row);
        }

        let table = MatchTable { rows };
        info!(
            sources = sources.len(),
            targets = targets.len(),
            matches = table.total_matches(),
            threshold = self.threshold,
            "matching complete"
        );
        Ok(table)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// One row of matches per source, in source order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchTable {
    rows: Vec<Vec<ScoredLabel>>,
}

impl MatchTable {
    /// Build a table from already-scored rows
    pub fn new(rows: Vec<Vec<ScoredLabel>>) -> Self {
        Self { rows }
    }

    /// Rebuild a table from rendered cells
    ///
    /// Blank cells are padding and are skipped, as is any cell that does not
    /// parse as `"<label> (<score>)"`.
    pub fn from_cells(rows: &[Vec<String>]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().filter_map(|cell| ScoredLabel::parse(cell)).collect())
            .collect();
        Self { rows }
    }

    /// Matches per source
    pub fn rows(&self) -> &[Vec<ScoredLabel>] {
        &self.rows
    }

    /// Number of source rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of matches across all rows
    pub fn total_matches(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Width every row is padded to: the longest row, and at least 1
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0).max(1)
    }

    /// Rendered, rectangular rows; shorter rows are padded with empty strings
    pub fn padded_rows(&self) -> Vec<Vec<String>> {
        let width = self.width();
        self.rows
            .iter()
            .map(|row| {
                let mut cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                cells.resize(width, String::new());
                cells
            })
            .collect()
    }

    /// `"Y"` for each row with at least one match, `"N"` otherwise
    pub fn match_status(&self) -> Vec<&'static str> {
        self.rows
            .iter()
            .map(|row| if row.is_empty() { UNMATCHED } else { MATCHED })
            .collect()
    }
}
