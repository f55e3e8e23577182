//! TF-IDF vectorizer for text feature extraction.

use std::sync::Arc;

use rayon::prelude::*;

use crate::analysis::normalizer::{NormalizedTokens, Normalizer};
use crate::error::Result;
use crate::ml::features::{FeatureVector, extract, term_sequence};
use crate::ml::vocabulary::{Vocabulary, VocabularyConfig};

/// TF-IDF vectorizer: a normalizer paired with a fitted vocabulary.
#[derive(Clone)]
pub struct TfIdfVectorizer {
    normalizer: Normalizer,
    vocabulary: Arc<Vocabulary>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("ngram_range", &self.vocabulary.ngram_range())
            .field("analyzer", &self.normalizer.analyzer().name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a vectorizer from an existing vocabulary.
    pub fn new(normalizer: Normalizer, vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            normalizer,
            vocabulary,
        }
    }

    /// Fit the vocabulary on training documents.
    pub fn fit(
        normalizer: Normalizer,
        documents: &[String],
        config: &VocabularyConfig,
    ) -> Result<Self> {
        let tokenized = tokenize_all(&normalizer, documents)?;
        let vocabulary = Vocabulary::fit(&tokenized, config)?;
        Ok(Self::new(normalizer, Arc::new(vocabulary)))
    }

    /// Transform a raw document into a TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Result<FeatureVector> {
        let tokens = self.normalizer.tokens(document)?;
        Ok(self.transform_tokens(&tokens))
    }

    /// Transform an already normalized document.
    pub fn transform_tokens(&self, tokens: &NormalizedTokens) -> FeatureVector {
        let terms = term_sequence(tokens.as_slice(), self.vocabulary.ngram_range());
        extract(&terms, &self.vocabulary)
    }

    /// Transform many normalized documents in parallel.
    pub fn transform_batch(&self, documents: &[NormalizedTokens]) -> Vec<FeatureVector> {
        documents
            .par_iter()
            .map(|tokens| self.transform_tokens(tokens))
            .collect()
    }

    /// Get the fitted vocabulary.
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// Get the normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Normalize a corpus in parallel, preserving document order.
pub fn tokenize_all(normalizer: &Normalizer, documents: &[String]) -> Result<Vec<NormalizedTokens>> {
    documents
        .par_iter()
        .map(|doc| normalizer.tokens(doc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tfidf_vectorizer() {
        let documents = vec![
            "Wire transfer required before start".to_string(),
            "Competitive salary and benefits".to_string(),
            "Earn money from home, wire transfer".to_string(),
        ];

        let normalizer = Normalizer::job_posting().unwrap();
        let vectorizer =
            TfIdfVectorizer::fit(normalizer, &documents, &VocabularyConfig::default()).unwrap();
        assert!(vectorizer.vocabulary_size() > 0);
        assert!(vectorizer.vocabulary().contains("wire transfer"));

        let features = vectorizer.transform("wire transfer salary").unwrap();
        assert_eq!(features.len(), vectorizer.vocabulary_size());
        assert!((features.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_batch_matches_single() {
        let documents = vec!["remote team".to_string(), "remote salary".to_string()];
        let normalizer = Normalizer::job_posting().unwrap();
        let vectorizer =
            TfIdfVectorizer::fit(normalizer.clone(), &documents, &VocabularyConfig::default())
                .unwrap();

        let tokenized = tokenize_all(&normalizer, &documents).unwrap();
        let batch = vectorizer.transform_batch(&tokenized);
        assert_eq!(batch[1], vectorizer.transform("remote salary").unwrap());
    }
}
