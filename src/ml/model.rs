//! The persisted model artifact.
//!
//! An artifact bundles everything inference needs: the fitted vocabulary,
//! the logistic regression weights and, for trained artifacts, metadata
//! describing how they were produced. It is stored as pretty-printed JSON.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::MLError;
use crate::ml::classifier::ModelWeights;
use crate::ml::vocabulary::{NgramRange, Vocabulary};

/// Version of the artifact layout written by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// How an artifact was trained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub trained_at: DateTime<Utc>,
    pub training_examples: usize,
    pub test_examples: usize,
    pub train_accuracy: f64,
    pub test_accuracy: Option<f64>,
    pub max_features: Option<usize>,
    pub ngram_range: NgramRange,
    pub c: f64,
    pub max_iter: usize,
    pub seed: u64,
}

/// Vocabulary + weights (+ metadata), validated to agree in dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPostingModel {
    format_version: u32,
    vocabulary: Vocabulary,
    weights: ModelWeights,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<TrainingMetadata>,
}

impl JobPostingModel {
    /// Bundle a vocabulary with matching weights.
    pub fn new(
        vocabulary: Vocabulary,
        weights: ModelWeights,
        metadata: Option<TrainingMetadata>,
    ) -> Result<Self> {
        let model = JobPostingModel {
            format_version: FORMAT_VERSION,
            vocabulary,
            weights,
            metadata,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(MLError::invalid_model(format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                self.format_version
            ))
            .into());
        }
        if self.vocabulary.is_empty() {
            return Err(MLError::invalid_model("vocabulary is empty").into());
        }
        if self.weights.len() != self.vocabulary.len() {
            return Err(MLError::DimensionMismatch {
                expected: self.vocabulary.len(),
                actual: self.weights.len(),
            }
            .into());
        }
        Ok(())
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn weights(&self) -> &ModelWeights {
        &self.weights
    }

    pub fn metadata(&self) -> Option<&TrainingMetadata> {
        self.metadata.as_ref()
    }

    /// Split into its parts.
    pub fn into_parts(self) -> (Vocabulary, ModelWeights, Option<TrainingMetadata>) {
        (self.vocabulary, self.weights, self.metadata)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate an artifact.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: JobPostingModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Write the artifact to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json().map_err(|e| MLError::ModelSaveError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        std::fs::write(path, json).map_err(|e| MLError::ModelSaveError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        log::info!("Saved model to {}", path.display());
        Ok(())
    }

    /// Read and validate the artifact at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| MLError::ModelLoadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let model = Self::from_json(&content).map_err(|e| MLError::ModelLoadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        log::info!(
            "Loaded model from {} ({} terms)",
            path.display(),
            model.vocabulary.len()
        );
        Ok(model)
    }

    /// The `n` terms with the largest positive and the largest negative
    /// coefficients, as `(fake_leaning, real_leaning)`.
    pub fn top_terms(&self, n: usize) -> (Vec<(String, f64)>, Vec<(String, f64)>) {
        let mut ranked: Vec<(String, f64)> = self
            .vocabulary
            .terms()
            .iter()
            .cloned()
            .zip(self.weights.coefficients().iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let fake = ranked
            .iter()
            .filter(|(_, w)| *w > 0.0)
            .take(n)
            .cloned()
            .collect();
        let real = ranked
            .iter()
            .rev()
            .filter(|(_, w)| *w < 0.0)
            .take(n)
            .cloned()
            .collect();
        (fake, real)
    }
}
