//! Alignment report over a match table
//!
//! Summaries for a reviewer: how many matches fall in each quality band,
//! which objectives align best, which align with nothing, and how often
//! each reference label was hit.

use crate::error::{MatcherError, Result};
use crate::matcher::MatchTable;
use serde::Serialize;

/// A half-open score range `(lower, upper]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityBand {
    /// Display name
    pub name: String,
    /// Exclusive lower bound
    pub lower: f32,
    /// Inclusive upper bound
    pub upper: f32,
}

impl QualityBand {
    /// Create a band
    pub fn new(name: impl Into<String>, lower: f32, upper: f32) -> Self {
        Self {
            name: name.into(),
            lower,
            upper,
        }
    }

    /// Whether `score` falls in `(lower, upper]`
    pub fn contains(&self, score: f32) -> bool {
        score > self.lower && score <= self.upper
    }
}

/// Excellent (0.70, 1.00], Good (0.60, 0.70], Fair (0.50, 0.60]
pub fn default_bands() -> Vec<QualityBand> {
    vec![
        QualityBand::new("Excellent", 0.70, 1.00),
        QualityBand::new("Good", 0.60, 0.70),
        QualityBand::new("Fair", 0.50, 0.60),
    ]
}

/// How often one reference label was matched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCoverage {
    /// Reference label
    pub label: String,
    /// Number of objectives that matched it
    pub count: usize,
    /// Those objectives, in source order
    pub objectives: Vec<String>,
}

/// Serializable snapshot of a full report
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Number of source objectives
    pub objective_count: usize,
    /// Total matches
    pub match_count: usize,
    /// Match count per quality band, in band order
    pub bands: Vec<(String, usize)>,
    /// Matches in the top band
    pub excellent: Vec<String>,
    /// Objectives with the most matches
    pub top_aligned: Vec<String>,
    /// Objectives with no match
    pub unmatched: Vec<String>,
    /// Per-label coverage, in catalog order
    pub coverage: Vec<LabelCoverage>,
}

/// Report over source objectives and their match rows
#[derive(Debug)]
pub struct AlignmentReport<'a> {
    objectives: &'a [String],
    table: &'a MatchTable,
}

impl<'a> AlignmentReport<'a> {
    /// Pair objectives with their rows; both must be in the same order
    pub fn new(objectives: &'a [String], table: &'a MatchTable) -> Result<Self> {
        if objectives.len() != table.len() {
            return Err(MatcherError::LengthMismatch {
                what: "objectives and match rows",
                left: objectives.len(),
                right: table.len(),
            });
        }
        Ok(Self { objectives, table })
    }

    /// Number of matches with `lower < score <= upper`
    pub fn count_in_band(&self, lower: f32, upper: f32) -> usize {
        let band = QualityBand::new("", lower, upper);
        self.table
            .rows()
            .iter()
            .flatten()
            .filter(|m| band.contains(m.score))
            .count()
    }

    /// Match count per band
    pub fn band_counts(&self, bands: &[QualityBand]) -> Vec<(String, usize)> {
        bands
            .iter()
            .map(|b| (b.name.clone(), self.count_in_band(b.lower, b.upper)))
            .collect()
    }

    /// `"<objective>: <label> (<score>)"` for every match in `band`
    pub fn excellent_matches(&self, band: &QualityBand) -> Vec<String> {
        self.pairs()
            .flat_map(|(objective, row)| {
                row.iter()
                    .filter(move |m| band.contains(m.score))
                    .map(move |m| format!("{}: {}", objective, m))
            })
            .collect()
    }

    /// `"<count> Matches: <objective>"` for the `n` objectives with most matches
    ///
    /// Ties keep source order.
    pub fn top_aligned(&self, n: usize) -> Vec<String> {
        let mut counts: Vec<(usize, &str)> = self
            .pairs()
            .map(|(objective, row)| (row.len(), objective))
            .collect();
        counts.sort_by(|a, b| b.0.cmp(&a.0));
        counts
            .into_iter()
            .take(n)
            .map(|(count, objective)| format!("{} Matches: {}", count, objective))
            .collect()
    }

    /// Objectives with no match at all
    pub fn unmatched(&self) -> Vec<&'a str> {
        self.pairs()
            .filter(|(_, row)| row.is_empty())
            .map(|(objective, _)| objective)
            .collect()
    }

    /// For each label, in the given order, which objectives matched it
    pub fn label_coverage(&self, labels: &[String]) -> Vec<LabelCoverage> {
        labels
            .iter()
            .map(|label| {
                let objectives: Vec<String> = self
                    .pairs()
                    .filter(|(_, row)| row.iter().any(|m| &m.label == label))
                    .map(|(objective, _)| objective.to_string())
                    .collect();
                LabelCoverage {
                    label: label.clone(),
                    count: objectives.len(),
                    objectives,
                }
            })
            .collect()
    }

    /// Everything at once
    ///
    /// The first band is treated as the excellent band.
    pub fn summary(&self, bands: &[QualityBand], labels: &[String], top_n: usize) -> ReportSummary {
        ReportSummary {
            objective_count: self.objectives.len(),
            match_count: self.table.total_matches(),
            bands: self.band_counts(bands),
            excellent: bands
                .first()
                .map(|b| self.excellent_matches(b))
                .unwrap_or_default(),
            top_aligned: self.top_aligned(top_n),
            unmatched: self.unmatched().into_iter().map(String::from).collect(),
            coverage: self.label_coverage(labels),
        }
    }

    fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a [syllabus_domain::ScoredLabel])> + '_ {
        self.objectives
            .iter()
            .map(String::as_str)
            .zip(self.table.rows().iter().map(Vec::as_slice))
    }
}
