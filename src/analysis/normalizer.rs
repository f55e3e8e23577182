//! Normalization of raw posting text into a token sequence.
//!
//! The normalizer is the trust boundary of the pipeline: it rejects empty
//! input itself instead of relying on the caller to have checked.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::job_posting::JobPostingAnalyzer;
use crate::error::{JobGuardError, Result};

/// Ordered normalized tokens of one document. Multiplicity is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTokens(Vec<String>);

impl NormalizedTokens {
    /// Wrap an already normalized token list.
    pub fn new(tokens: Vec<String>) -> Self {
        NormalizedTokens(tokens)
    }

    /// Tokens in document order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of tokens, counting repeats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether normalization removed every token.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the tokens in document order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Consume into the inner vector.
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<&str>> for NormalizedTokens {
    fn from(tokens: Vec<&str>) -> Self {
        NormalizedTokens(tokens.into_iter().map(str::to_string).collect())
    }
}

/// Turns raw text into [`NormalizedTokens`] with a shared analyzer.
#[derive(Clone)]
pub struct Normalizer {
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl Normalizer {
    /// Create a normalizer backed by the given analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Normalizer { analyzer }
    }

    /// Create a normalizer with the default job posting analyzer.
    pub fn job_posting() -> Result<Self> {
        Ok(Self::new(Arc::new(JobPostingAnalyzer::new()?)))
    }

    /// Get the analyzer.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Normalize `text`.
    ///
    /// Fails with [`JobGuardError::EmptyInput`] when the trimmed text is empty.
    /// Text that is non-empty but loses every token during analysis yields an
    /// empty sequence rather than an error.
    pub fn normalize(&self, text: &str) -> Result<NormalizedTokens> {
        if text.trim().is_empty() {
            return Err(JobGuardError::empty_input("Please enter a job description."));
        }
        self.tokens(text)
    }

    /// Normalize without the emptiness check, for training corpora where
    /// blank documents are legitimate.
    pub fn tokens(&self, text: &str) -> Result<NormalizedTokens> {
        let tokens = self
            .analyzer
            .analyze(text)?
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect();
        Ok(NormalizedTokens(tokens))
    }
}
