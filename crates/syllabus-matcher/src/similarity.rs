//! Cosine similarity

use crate::error::{MatcherError, Result};

/// Calculate cosine similarity between two vectors
///
/// Returns a value in [-1, 1], where 1.0 means identical direction. If either
/// vector has zero magnitude the similarity is 0.0, so the zero placeholder
/// embedding never matches anything.
///
/// # Errors
///
/// [`MatcherError::DimensionMismatch`] if the vectors differ in length.
///
/// # Examples
///
/// ```
/// use syllabus_matcher::cosine_similarity;
///
/// let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 1.0]).unwrap();
/// assert!((sim - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
///
/// assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
/// assert!(cosine_similarity(&[1.0], &[1.0, 1.0]).is_err());
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(MatcherError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot_product: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let magnitude_a = magnitude(a);
    let magnitude_b = magnitude(b);

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Ok(0.0);
    }

    // rounding can push parallel vectors just past 1.0
    Ok((dot_product / (magnitude_a * magnitude_b)).clamp(-1.0, 1.0))
}

fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = [0.3, -0.2, 0.9];
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_self_similarity_never_exceeds_one() {
        let v: Vec<f32> = (0..1536).map(|i| ((i * 7919) % 1000) as f32 / 997.0 - 0.5).collect();
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!(sim <= 1.0);
        assert!(sim > 0.999);

        let scaled: Vec<f32> = v.iter().map(|x| x * 3.0).collect();
        assert!(cosine_similarity(&v, &scaled).unwrap() <= 1.0);
    }

    #[test]
    fn test_orthogonal_and_opposite() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_is_zero_not_nan() {
        let sim = cosine_similarity(&[0.0; 4], &[0.0; 4]).unwrap();
        assert_eq!(sim, 0.0);
        assert!(!sim.is_nan());
    }

    #[test]
    fn test_dimension_mismatch() {
        match cosine_similarity(&[1.0, 2.0, 3.0], &[1.0]) {
            Err(MatcherError::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 1);
            }
            other => panic!("expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_vectors() {
        assert_eq!(cosine_similarity(&[], &[]).unwrap(), 0.0);
    }
}
