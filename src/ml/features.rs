//! Term sequences and TF-IDF feature vectors.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::MLError;
use crate::ml::vocabulary::{NgramRange, Vocabulary};

/// Derive the n-gram terms of a token sequence.
///
/// Terms are ordered by the token they start at, shorter n-grams first for
/// the same start, so the sequence reflects where each term first appears.
/// Multi-token terms are joined with a single space.
///
/// ```
/// use jobguard::ml::features::term_sequence;
/// use jobguard::ml::vocabulary::NgramRange;
///
/// let tokens = vec!["wire".to_string(), "transfer".to_string(), "fee".to_string()];
/// let terms = term_sequence(&tokens, NgramRange::default());
/// assert_eq!(terms, vec!["wire", "wire transfer", "transfer", "transfer fee", "fee"]);
/// ```
pub fn term_sequence(tokens: &[String], ngram_range: NgramRange) -> Vec<String> {
    let min_n = ngram_range.min_n.max(1);
    let mut terms = Vec::new();
    for start in 0..tokens.len() {
        for n in min_n..=ngram_range.max_n {
            let Some(window) = tokens.get(start..start + n) else {
                break;
            };
            terms.push(window.join(" "));
        }
    }
    terms
}

/// Dense feature vector with one weight per vocabulary index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// All-zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        FeatureVector(vec![0.0; dimension])
    }

    /// Wrap raw values.
    pub fn from_values(values: Vec<f64>) -> Self {
        FeatureVector(values)
    }

    /// Dimension of the vector.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has dimension zero.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at `idx` (zero when out of range).
    pub fn get(&self, idx: usize) -> f64 {
        self.0.get(idx).copied().unwrap_or(0.0)
    }

    /// Raw values.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Indices with a non-zero value.
    pub fn nonzero_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(idx, _)| idx)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Dot product with a weight vector of the same dimension.
    pub fn dot(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != self.0.len() {
            return Err(MLError::DimensionMismatch {
                expected: weights.len(),
                actual: self.0.len(),
            }
            .into());
        }
        Ok(self.0.iter().zip(weights).map(|(x, w)| x * w).sum())
    }
}

/// Build the TF-IDF vector of a term sequence.
///
/// Each in-vocabulary term contributes `count × idf`, and the vector is then
/// scaled to unit length. Terms outside the vocabulary are ignored, so a
/// document without known terms maps to the zero vector.
pub fn extract(terms: &[String], vocabulary: &Vocabulary) -> FeatureVector {
    let mut values = vec![0.0; vocabulary.len()];

    for term in terms {
        if let Some(idx) = vocabulary.index_of(term) {
            values[idx] += 1.0;
        }
    }

    for (idx, value) in values.iter_mut().enumerate() {
        if *value != 0.0 {
            *value *= vocabulary.idf(idx).unwrap_or(1.0);
        }
    }

    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in &mut values {
            *value /= norm;
        }
    }

    FeatureVector(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn vocabulary() -> Vocabulary {
        Vocabulary::from_parts(
            NgramRange::default(),
            strings(&["fee", "transfer", "wire", "wire transfer"]),
            vec![2.0, 1.0, 1.5, 3.0],
        )
        .unwrap()
    }

    #[test]
    fn test_term_sequence_ranges() {
        let tokens = strings(&["earn", "money", "fast"]);
        assert_eq!(
            term_sequence(&tokens, NgramRange::unigrams()),
            strings(&["earn", "money", "fast"])
        );
        assert_eq!(
            term_sequence(&tokens, NgramRange { min_n: 2, max_n: 3 }),
            strings(&["earn money", "earn money fast", "money fast"])
        );
        assert_eq!(
            term_sequence(&tokens, NgramRange::default()),
            strings(&["earn", "earn money", "money", "money fast", "fast"])
        );
        assert!(term_sequence(&[], NgramRange::default()).is_empty());
        assert_eq!(
            term_sequence(&strings(&["solo"]), NgramRange::default()),
            strings(&["solo"])
        );
    }

    #[test]
    fn test_extract_dimension_and_norm() {
        let vocab = vocabulary();
        let terms = term_sequence(&strings(&["wire", "transfer", "wire"]), vocab.ngram_range());
        let features = extract(&terms, &vocab);

        assert_eq!(features.len(), vocab.len());
        assert!((features.norm() - 1.0).abs() < 1e-12);
        assert_eq!(features.get(0), 0.0);

        // wire: 2 × 1.5, transfer: 1 × 1.0, "wire transfer": 1 × 3.0
        let raw = [0.0, 1.0, 3.0, 3.0];
        let norm = (1.0f64 + 9.0 + 9.0).sqrt();
        for (idx, expected) in raw.iter().enumerate() {
            assert!((features.get(idx) - expected / norm).abs() < 1e-12);
        }
    }

    #[test]
    fn test_out_of_vocabulary_is_zero_vector() {
        let vocab = vocabulary();
        let features = extract(&strings(&["remote", "salary"]), &vocab);
        assert_eq!(features.len(), vocab.len());
        assert_eq!(features.norm(), 0.0);
        assert_eq!(features.nonzero_indices().count(), 0);
    }

    #[test]
    fn test_dot_checks_dimension() {
        let features = FeatureVector::from_values(vec![0.5, 0.5]);
        assert_eq!(features.dot(&[2.0, -1.0]).unwrap(), 0.5);
        assert!(features.dot(&[1.0]).is_err());
    }
}
