//! Read-only model state shared by every request.

use std::path::Path;
use std::sync::Arc;

use crate::analysis::normalizer::Normalizer;
use crate::error::Result;
use crate::ml::classifier::ModelWeights;
use crate::ml::model::{JobPostingModel, TrainingMetadata};
use crate::ml::tfidf::TfIdfVectorizer;
use crate::ml::vocabulary::Vocabulary;

/// Vectorizer and weights loaded once at start-up.
///
/// The context is never mutated after construction; share it with
/// `Arc<ModelContext>`.
#[derive(Debug)]
pub struct ModelContext {
    vectorizer: TfIdfVectorizer,
    weights: ModelWeights,
    metadata: Option<TrainingMetadata>,
}

impl ModelContext {
    /// Build a context from a model and the normalizer it was trained with.
    pub fn new(normalizer: Normalizer, model: JobPostingModel) -> Self {
        let (vocabulary, weights, metadata) = model.into_parts();
        ModelContext {
            vectorizer: TfIdfVectorizer::new(normalizer, Arc::new(vocabulary)),
            weights,
            metadata,
        }
    }

    /// Build a context using the default job posting normalizer.
    pub fn from_model(model: JobPostingModel) -> Result<Self> {
        Ok(Self::new(Normalizer::job_posting()?, model))
    }

    /// Load a model artifact from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Arc<Self>> {
        let model = JobPostingModel::load(path)?;
        Ok(Arc::new(Self::from_model(model)?))
    }

    pub fn normalizer(&self) -> &Normalizer {
        self.vectorizer.normalizer()
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.vectorizer.vocabulary()
    }

    pub fn weights(&self) -> &ModelWeights {
        &self.weights
    }

    pub fn metadata(&self) -> Option<&TrainingMetadata> {
        self.metadata.as_ref()
    }
}
