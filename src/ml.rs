//! Machine learning core of the fake posting detector.
//!
//! The modules follow the inference pipeline from leaves to root:
//!
//! - [`vocabulary`]: fitted term → index mapping with IDF weights
//! - [`features`]: n-gram term sequences and TF-IDF feature vectors
//! - [`tfidf`]: analyzer + vocabulary bundled as a vectorizer
//! - [`classifier`]: linear scoring and logistic calibration
//! - [`attribution`]: per-term contributions ranked into red and green flags
//! - [`model`]: the persisted model artifact
//! - [`dataset`] and [`training`]: offline fitting of a new artifact

pub mod attribution;
pub mod classifier;
pub mod dataset;
pub mod features;
pub mod model;
pub mod tfidf;
pub mod training;
pub mod vocabulary;

pub use attribution::{Attribution, AttributionConfig, Flag};
pub use classifier::{ClassProbabilities, Classifier, ModelWeights, RawScore, Verdict};
pub use features::FeatureVector;
pub use model::{JobPostingModel, TrainingMetadata};
pub use tfidf::TfIdfVectorizer;
pub use training::{LogisticRegressionTrainer, TrainingConfig, TrainingReport};
pub use vocabulary::{NgramRange, Vocabulary, VocabularyConfig};

/// Machine learning error types.
#[derive(Debug, thiserror::Error)]
pub enum MLError {
    #[error("Feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Training data insufficient: need at least {min_samples} samples, got {actual}")]
    InsufficientTrainingData { min_samples: usize, actual: usize },

    #[error("Invalid training data: {message}")]
    InvalidTrainingData { message: String },

    #[error("Invalid model: {message}")]
    InvalidModel { message: String },

    #[error("Model loading failed: {path}: {message}")]
    ModelLoadError { path: String, message: String },

    #[error("Model saving failed: {path}: {message}")]
    ModelSaveError { path: String, message: String },
}

impl MLError {
    /// Create an invalid model error.
    pub fn invalid_model<S: Into<String>>(message: S) -> Self {
        MLError::InvalidModel {
            message: message.into(),
        }
    }

    /// Create an invalid training data error.
    pub fn invalid_training_data<S: Into<String>>(message: S) -> Self {
        MLError::InvalidTrainingData {
            message: message.into(),
        }
    }
}
