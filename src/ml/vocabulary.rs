//! Fitted vocabulary: term → index mapping plus IDF weights.
//!
//! A vocabulary is built once from a training corpus and is immutable
//! afterwards. Indices are assigned in lexicographic term order so two fits
//! over the same corpus always produce the same layout.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizedTokens;
use crate::error::Result;
use crate::ml::MLError;
use crate::ml::features::term_sequence;

/// Default cap on the number of vocabulary terms.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Inclusive range of n-gram sizes used to derive terms from tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramRange {
    pub min_n: usize,
    pub max_n: usize,
}

impl NgramRange {
    /// Create a range, rejecting `0` and inverted bounds.
    pub fn new(min_n: usize, max_n: usize) -> Result<Self> {
        if min_n == 0 || min_n > max_n {
            return Err(MLError::invalid_model(format!(
                "invalid n-gram range ({min_n}, {max_n})"
            ))
            .into());
        }
        Ok(NgramRange { min_n, max_n })
    }

    /// Unigrams only.
    pub fn unigrams() -> Self {
        NgramRange { min_n: 1, max_n: 1 }
    }
}

impl Default for NgramRange {
    fn default() -> Self {
        NgramRange { min_n: 1, max_n: 2 }
    }
}

/// Parameters for [`Vocabulary::fit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// N-gram sizes to index.
    pub ngram_range: NgramRange,
    /// Keep only this many terms, ranked by corpus frequency.
    pub max_features: Option<usize>,
    /// Drop terms that occur in fewer documents than this.
    pub min_df: usize,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            ngram_range: NgramRange::default(),
            max_features: Some(DEFAULT_MAX_FEATURES),
            min_df: 1,
        }
    }
}

/// Serialized layout of a vocabulary; the lookup index is rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableVocabulary {
    ngram_range: NgramRange,
    terms: Vec<String>,
    idf: Vec<f64>,
}

/// Immutable term → index mapping with one IDF weight per index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SerializableVocabulary", into = "SerializableVocabulary")]
pub struct Vocabulary {
    ngram_range: NgramRange,
    terms: Vec<String>,
    idf: Vec<f64>,
    index: AHashMap<String, usize>,
}

impl TryFrom<SerializableVocabulary> for Vocabulary {
    type Error = MLError;

    fn try_from(data: SerializableVocabulary) -> std::result::Result<Self, Self::Error> {
        Vocabulary::build(data.ngram_range, data.terms, data.idf)
    }
}

impl From<Vocabulary> for SerializableVocabulary {
    fn from(vocabulary: Vocabulary) -> Self {
        SerializableVocabulary {
            ngram_range: vocabulary.ngram_range,
            terms: vocabulary.terms,
            idf: vocabulary.idf,
        }
    }
}

impl Vocabulary {
    /// Assemble a vocabulary from explicit terms and IDF weights.
    ///
    /// Index `i` of `idf` belongs to `terms[i]`. Terms must be unique and
    /// every weight finite.
    pub fn from_parts(ngram_range: NgramRange, terms: Vec<String>, idf: Vec<f64>) -> Result<Self> {
        Ok(Self::build(ngram_range, terms, idf)?)
    }

    fn build(
        ngram_range: NgramRange,
        terms: Vec<String>,
        idf: Vec<f64>,
    ) -> std::result::Result<Self, MLError> {
        if ngram_range.min_n == 0 || ngram_range.min_n > ngram_range.max_n {
            return Err(MLError::invalid_model("invalid n-gram range"));
        }
        if terms.len() != idf.len() {
            return Err(MLError::invalid_model(format!(
                "vocabulary has {} terms but {} idf weights",
                terms.len(),
                idf.len()
            )));
        }
        if let Some(bad) = idf.iter().position(|w| !w.is_finite()) {
            return Err(MLError::invalid_model(format!(
                "idf weight of '{}' is not finite",
                terms[bad]
            )));
        }

        let mut index = AHashMap::with_capacity(terms.len());
        for (idx, term) in terms.iter().enumerate() {
            if index.insert(term.clone(), idx).is_some() {
                return Err(MLError::invalid_model(format!(
                    "duplicate vocabulary term '{term}'"
                )));
            }
        }

        Ok(Vocabulary {
            ngram_range,
            terms,
            idf,
            index,
        })
    }

    /// Fit a vocabulary over tokenized documents.
    ///
    /// Terms with document frequency below `min_df` are dropped, the
    /// `max_features` most frequent terms across the corpus are kept (ties
    /// broken lexicographically) and IDF is the smoothed
    /// `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit(documents: &[NormalizedTokens], config: &VocabularyConfig) -> Result<Self> {
        if documents.is_empty() {
            return Err(MLError::InsufficientTrainingData {
                min_samples: 1,
                actual: 0,
            }
            .into());
        }

        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        let mut term_frequency: AHashMap<String, usize> = AHashMap::new();

        for doc in documents {
            let terms = term_sequence(doc.as_slice(), config.ngram_range);
            let mut seen = ahash::AHashSet::with_capacity(terms.len());
            for term in terms {
                *term_frequency.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.clone()) {
                    *document_frequency.entry(term).or_insert(0) += 1;
                }
            }
        }

        let mut candidates: Vec<(String, usize)> = term_frequency
            .into_iter()
            .filter(|(term, _)| document_frequency.get(term).copied().unwrap_or(0) >= config.min_df)
            .collect();

        if let Some(max_features) = config.max_features {
            candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            candidates.truncate(max_features);
        }

        let mut terms: Vec<String> = candidates.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        if terms.is_empty() {
            return Err(MLError::invalid_training_data(
                "no terms survived vocabulary fitting",
            )
            .into());
        }

        let n_documents = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_documents) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        Ok(Self::build(config.ngram_range, terms, idf)?)
    }

    /// Number of terms (the feature dimension).
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Index of `term`, if it is in the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Whether `term` is in the vocabulary.
    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Term stored at `idx`.
    pub fn term(&self, idx: usize) -> Option<&str> {
        self.terms.get(idx).map(String::as_str)
    }

    /// IDF weight stored at `idx`.
    pub fn idf(&self, idx: usize) -> Option<f64> {
        self.idf.get(idx).copied()
    }

    /// All terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// All IDF weights in index order.
    pub fn idf_weights(&self) -> &[f64] {
        &self.idf
    }

    /// The n-gram range the vocabulary was fitted with.
    pub fn ngram_range(&self) -> NgramRange {
        self.ngram_range
    }
}
