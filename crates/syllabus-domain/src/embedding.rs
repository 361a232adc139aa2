//! Embedding vectors

/// Dimension of every embedding, fixed for compatibility with stored catalogs
pub const EMBEDDING_DIMENSION: usize = 1536;

/// An embedding vector
pub type Embedding = Vec<f32>;

/// The placeholder used whenever an embedding cannot be produced
///
/// A zero vector is a defined value, not an error: similarity against it is
/// always 0.
///
/// # Examples
///
/// ```
/// use syllabus_domain::{zero_embedding, EMBEDDING_DIMENSION};
///
/// let v = zero_embedding(EMBEDDING_DIMENSION);
/// assert_eq!(v.len(), 1536);
/// assert!(v.iter().all(|x| *x == 0.0));
/// ```
pub fn zero_embedding(dimension: usize) -> Embedding {
    vec![0.0; dimension]
}

/// Whether a vector is the zero placeholder
pub fn is_zero(vector: &[f32]) -> bool {
    vector.iter().all(|x| *x == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zero() {
        assert!(is_zero(&zero_embedding(4)));
        assert!(!is_zero(&[0.0, 0.1]));
        assert!(is_zero(&[]));
    }
}
