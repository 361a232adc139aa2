//! Reference labels paired with similarity scores

use std::fmt;

/// Number of decimals used whenever a score is rendered
pub const SCORE_DECIMALS: usize = 5;

/// A reference label that matched a source objective
///
/// Renders as `"<label> (<score to 5 decimals>)"`, which is the cell format
/// written to match tables.
///
/// # Examples
///
/// ```
/// use syllabus_domain::ScoredLabel;
///
/// let s = ScoredLabel::new("Patient care", 0.734512);
/// assert_eq!(s.to_string(), "Patient care (0.73451)");
///
/// let parsed = ScoredLabel::parse("Patient care (0.73451)").unwrap();
/// assert_eq!(parsed.label, "Patient care");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLabel {
    /// Reference label text
    pub label: String,
    /// Cosine similarity score
    pub score: f32,
}

impl ScoredLabel {
    /// Create a new scored label
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Parse a rendered `"<label> (<score>)"` cell
    ///
    /// Returns `None` when the cell does not end in a parenthesised decimal
    /// number.
    pub fn parse(cell: &str) -> Option<Self> {
        let trimmed = cell.trim();
        let body = trimmed.strip_suffix(')')?;
        let open = body.rfind('(')?;
        let score_str = &body[open + 1..];
        if !score_str.contains('.') {
            return None;
        }
        let score: f32 = score_str.trim().parse().ok()?;
        let label = body[..open].trim();
        if label.is_empty() {
            return None;
        }
        Some(Self::new(label, score))
    }
}

impl fmt::Display for ScoredLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.*})", self.label, SCORE_DECIMALS, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_to_five_decimals() {
        assert_eq!(ScoredLabel::new("x", 0.5).to_string(), "x (0.50000)");
        assert_eq!(ScoredLabel::new("x", 1.0).to_string(), "x (1.00000)");
    }

    #[test]
    fn test_parse_keeps_inner_parentheses() {
        let parsed = ScoredLabel::parse("Manage (cure or palliation) cases (0.61234)").unwrap();
        assert_eq!(parsed.label, "Manage (cure or palliation) cases");
        assert!((parsed.score - 0.61234).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        assert!(ScoredLabel::parse("").is_none());
        assert!(ScoredLabel::parse("no score here").is_none());
        assert!(ScoredLabel::parse("Year (2024)").is_none());
        assert!(ScoredLabel::parse("(0.5)").is_none());
    }
}
