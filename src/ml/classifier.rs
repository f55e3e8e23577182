//! Linear scoring and logistic calibration.
//!
//! The model is a binary logistic regression: a coefficient per vocabulary
//! index plus a bias. Positive scores lean toward [`Verdict::Fake`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::MLError;
use crate::ml::features::FeatureVector;

/// Class decided for a posting.
///
/// Serialized as its numeric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    /// Numeric label used on the wire and in training data (`1` = fake).
    pub fn label(self) -> u8 {
        match self {
            Verdict::Real => 0,
            Verdict::Fake => 1,
        }
    }

    /// Parse a numeric label.
    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(Verdict::Real),
            1 => Some(Verdict::Fake),
            _ => None,
        }
    }
}

impl From<Verdict> for u8 {
    fn from(verdict: Verdict) -> Self {
        verdict.label()
    }
}

impl TryFrom<u8> for Verdict {
    type Error = String;

    fn try_from(label: u8) -> std::result::Result<Self, Self::Error> {
        Verdict::from_label(label).ok_or_else(|| format!("invalid class label {label}"))
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Real => write!(f, "REAL"),
            Verdict::Fake => write!(f, "FAKE"),
        }
    }
}

/// Uncalibrated decision value; positive leans fake.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct RawScore(pub f64);

/// Probability of each class; the two values sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub real: f64,
    pub fake: f64,
}

/// Numerically stable logistic function.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Squash a raw score into class probabilities.
pub fn calibrate(score: RawScore) -> ClassProbabilities {
    let fake = sigmoid(score.0);
    ClassProbabilities {
        real: 1.0 - fake,
        fake,
    }
}

/// Classifier trait.
///
/// Implementations map a feature vector to a raw score; calibration into
/// probabilities defaults to the logistic function.
pub trait Classifier: Send + Sync {
    /// Compute the raw score of a feature vector.
    fn score(&self, features: &FeatureVector) -> Result<RawScore>;

    /// Convert a raw score into class probabilities.
    fn calibrate(&self, score: RawScore) -> ClassProbabilities {
        calibrate(score)
    }

    /// Score and calibrate in one step.
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities> {
        Ok(self.calibrate(self.score(features)?))
    }

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// Logistic regression weights: one coefficient per vocabulary index plus a bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelWeights {
    coefficients: Vec<f64>,
    bias: f64,
}

impl ModelWeights {
    /// Create weights, rejecting non-finite values.
    pub fn new(coefficients: Vec<f64>, bias: f64) -> Result<Self> {
        if !bias.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(MLError::invalid_model("model weights must be finite").into());
        }
        Ok(ModelWeights { coefficients, bias })
    }

    /// All-zero weights of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        ModelWeights {
            coefficients: vec![0.0; dimension],
            bias: 0.0,
        }
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Whether there are no coefficients.
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Coefficient at `idx`.
    pub fn coefficient(&self, idx: usize) -> Option<f64> {
        self.coefficients.get(idx).copied()
    }

    /// All coefficients in vocabulary order.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Bias term.
    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub(crate) fn coefficients_mut(&mut self) -> &mut [f64] {
        &mut self.coefficients
    }

    pub(crate) fn set_bias(&mut self, bias: f64) {
        self.bias = bias;
    }
}

impl Classifier for ModelWeights {
    fn score(&self, features: &FeatureVector) -> Result<RawScore> {
        Ok(RawScore(features.dot(&self.coefficients)? + self.bias))
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}
