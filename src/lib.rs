//! # jobguard
//!
//! Explainable detection of fake job postings.
//!
//! ## Features
//!
//! - Text analysis pipeline (HTML stripping, tokenization, stop words)
//! - TF-IDF features over unigrams and bigrams
//! - Logistic regression with calibrated probabilities
//! - Red/green flag attribution per prediction
//! - Optional word cloud rendering
//! - HTTP API and CLI

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod ml;
pub mod server;
pub mod service;

pub mod prelude {
    pub use crate::config::{ServerConfig, ServiceConfig, WordCloudConfig};
    pub use crate::error::{JobGuardError, Result};
    pub use crate::ml::{Flag, JobPostingModel, Verdict};
    pub use crate::service::{ModelContext, PredictionResult, PredictionService};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
