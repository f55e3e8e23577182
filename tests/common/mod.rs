//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use jobguard::config::ServiceConfig;
use jobguard::ml::{JobPostingModel, ModelWeights, NgramRange, Vocabulary};
use jobguard::service::{ModelContext, PredictionService};

pub const SCAM_POSTING: &str = "Earn $5000 weekly from home! No experience needed. \
     Wire transfer processing fee required.";

pub const REMOTE_POSTING: &str =
    "remote position competitive salary benefits excellent communication";

pub const REAL_POSTING: &str = "Senior software engineer. Competitive salary, health insurance \
     and 401k retirement plan. Bachelor's degree in computer science required.";

/// Hand-weighted model: scam markers lean fake, ordinary benefits lean real.
pub fn fixture_model(bias: f64) -> JobPostingModel {
    let entries: [(&str, f64); 20] = [
        ("benefits", -1.2),
        ("communication", -0.6),
        ("competitive salary", -1.5),
        ("degree", -0.8),
        ("earn", 2.0),
        ("engineer", -1.0),
        ("experience needed", 1.0),
        ("fee", 1.5),
        ("health insurance", -2.5),
        ("home", 0.8),
        ("insurance", -1.0),
        ("processing fee", 2.5),
        ("remote", -1.0),
        ("required", 0.0),
        ("retirement", -0.7),
        ("salary", -2.0),
        ("software engineer", -2.0),
        ("weekly", 1.2),
        ("wire", 1.0),
        ("wire transfer", 3.0),
    ];

    let terms = entries.iter().map(|(t, _)| t.to_string()).collect();
    let coefficients = entries.iter().map(|(_, c)| *c).collect();
    let vocabulary =
        Vocabulary::from_parts(NgramRange::default(), terms, vec![1.5; entries.len()]).unwrap();
    let weights = ModelWeights::new(coefficients, bias).unwrap();
    JobPostingModel::new(vocabulary, weights, None).unwrap()
}

pub fn context(bias: f64) -> Arc<ModelContext> {
    Arc::new(ModelContext::from_model(fixture_model(bias)).unwrap())
}

pub fn service(config: ServiceConfig) -> PredictionService {
    PredictionService::new(context(-0.5), config)
}
