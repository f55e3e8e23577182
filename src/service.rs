//! Prediction service facade.
//!
//! [`PredictionService`] is the single entry point used by the HTTP server
//! and the CLI. It owns a shared [`ModelContext`] and turns raw posting text
//! into a [`PredictionResult`], optionally decorated with a word cloud.

pub mod context;
pub mod prediction;
pub mod wordcloud;

pub use context::ModelContext;
pub use prediction::{PredictionResult, PredictionService, Probabilities};
pub use wordcloud::{BitmapWordCloud, WordCloudRenderer};
