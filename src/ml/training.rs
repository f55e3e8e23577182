//! Offline training of a new model artifact.
//!
//! Training follows a fixed recipe: split the labelled postings into a
//! stratified train/test partition, fit the vocabulary on the training
//! partition only, then fit a class-balanced, L2-regularised logistic
//! regression by batch gradient descent.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::Normalizer;
use crate::error::Result;
use crate::ml::MLError;
use crate::ml::classifier::{Classifier, ModelWeights, sigmoid};
use crate::ml::dataset::JobPostingRecord;
use crate::ml::features::FeatureVector;
use crate::ml::model::{JobPostingModel, TrainingMetadata};
use crate::ml::tfidf::{TfIdfVectorizer, tokenize_all};
use crate::ml::vocabulary::{Vocabulary, VocabularyConfig};

/// Training configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Vocabulary fitting parameters.
    pub vocabulary: VocabularyConfig,
    /// Inverse regularisation strength; smaller values regularise more.
    pub c: f64,
    /// Maximum gradient descent iterations.
    pub max_iter: usize,
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// Stop once the gradient norm drops below this.
    pub tolerance: f64,
    /// Reweight samples so both classes contribute equally.
    pub balanced: bool,
    /// Fraction of each class held out for evaluation.
    pub test_size: f64,
    /// Seed for the train/test shuffle.
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocabulary: VocabularyConfig::default(),
            c: 1.0,
            max_iter: 1000,
            learning_rate: 0.5,
            tolerance: 1e-6,
            balanced: true,
            test_size: 0.2,
            seed: 42,
        }
    }
}

impl TrainingConfig {
    /// Reject values that would make training meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(MLError::invalid_training_data("c must be positive").into());
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(MLError::invalid_training_data("learning rate must be positive").into());
        }
        if !(0.0..1.0).contains(&self.test_size) {
            return Err(MLError::invalid_training_data("test size must be in [0, 1)").into());
        }
        if self.max_iter == 0 {
            return Err(MLError::invalid_training_data("max_iter must be at least 1").into());
        }
        Ok(())
    }
}

/// Statistics of one gradient descent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitStats {
    pub iterations: usize,
    pub final_loss: f64,
    pub converged: bool,
    pub training_time_ms: u64,
}

/// Outcome of [`train`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub metadata: TrainingMetadata,
    pub stats: FitStats,
}

/// Binary logistic regression fitted by batch gradient descent.
///
/// The objective is the (optionally class-weighted) mean cross-entropy plus
/// `‖w‖² / (2·C·n)`, i.e. the usual `C`-parameterised objective divided by
/// the sample count. The bias is not penalised.
#[derive(Debug, Clone)]
pub struct LogisticRegressionTrainer {
    c: f64,
    max_iter: usize,
    learning_rate: f64,
    tolerance: f64,
    balanced: bool,
}

impl LogisticRegressionTrainer {
    pub fn new(config: &TrainingConfig) -> Self {
        Self {
            c: config.c,
            max_iter: config.max_iter,
            learning_rate: config.learning_rate,
            tolerance: config.tolerance,
            balanced: config.balanced,
        }
    }

    /// Fit weights on `features` with labels `labels` (`true` = fake).
    pub fn fit(&self, features: &[FeatureVector], labels: &[bool]) -> Result<(ModelWeights, FitStats)> {
        if features.len() != labels.len() {
            return Err(MLError::invalid_training_data(format!(
                "{} feature vectors but {} labels",
                features.len(),
                labels.len()
            ))
            .into());
        }
        if features.len() < 2 {
            return Err(MLError::InsufficientTrainingData {
                min_samples: 2,
                actual: features.len(),
            }
            .into());
        }

        let dimension = features[0].len();
        if let Some(bad) = features.iter().find(|f| f.len() != dimension) {
            return Err(MLError::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            }
            .into());
        }

        let sample_weights = self.sample_weights(labels)?;
        let n = features.len() as f64;
        let l2 = 1.0 / (self.c * n);

        // Feature vectors are mostly zeros; iterate only the populated entries.
        let sparse: Vec<Vec<(usize, f64)>> = features
            .iter()
            .map(|f| f.nonzero_indices().map(|idx| (idx, f.get(idx))).collect())
            .collect();

        let start_time = std::time::Instant::now();
        let mut weights = ModelWeights::zeros(dimension);
        let mut grad_w = vec![0.0; dimension];
        let mut iterations = 0;
        let mut converged = false;

        for _ in 0..self.max_iter {
            iterations += 1;
            grad_w.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_b = 0.0;

            for ((row, &label), &sw) in sparse.iter().zip(labels).zip(&sample_weights) {
                let z = row
                    .iter()
                    .map(|&(idx, x)| weights.coefficients()[idx] * x)
                    .sum::<f64>()
                    + weights.bias();
                let target = if label { 1.0 } else { 0.0 };
                let err = sw * (sigmoid(z) - target) / n;
                for &(idx, x) in row {
                    grad_w[idx] += err * x;
                }
                grad_b += err;
            }

            for (g, w) in grad_w.iter_mut().zip(weights.coefficients()) {
                *g += l2 * w;
            }

            let grad_norm =
                (grad_w.iter().map(|g| g * g).sum::<f64>() + grad_b * grad_b).sqrt();
            if grad_norm < self.tolerance {
                converged = true;
                break;
            }

            for (w, g) in weights.coefficients_mut().iter_mut().zip(&grad_w) {
                *w -= self.learning_rate * g;
            }
            let bias = weights.bias() - self.learning_rate * grad_b;
            weights.set_bias(bias);
        }

        let final_loss = self.loss(&sparse, labels, &sample_weights, &weights);
        log::debug!(
            "Logistic regression stopped after {} iterations (loss {:.6}, converged: {})",
            iterations,
            final_loss,
            converged
        );

        Ok((
            weights,
            FitStats {
                iterations,
                final_loss,
                converged,
                training_time_ms: start_time.elapsed().as_millis() as u64,
            },
        ))
    }

    fn sample_weights(&self, labels: &[bool]) -> Result<Vec<f64>> {
        let n = labels.len() as f64;
        let n_fake = labels.iter().filter(|&&l| l).count() as f64;
        let n_real = n - n_fake;
        if n_fake == 0.0 || n_real == 0.0 {
            return Err(MLError::invalid_training_data(
                "training data must contain both real and fake postings",
            )
            .into());
        }
        if !self.balanced {
            return Ok(vec![1.0; labels.len()]);
        }
        Ok(labels
            .iter()
            .map(|&l| if l { n / (2.0 * n_fake) } else { n / (2.0 * n_real) })
            .collect())
    }

    fn loss(
        &self,
        sparse: &[Vec<(usize, f64)>],
        labels: &[bool],
        sample_weights: &[f64],
        weights: &ModelWeights,
    ) -> f64 {
        let n = labels.len() as f64;
        let data_loss: f64 = sparse
            .iter()
            .zip(labels)
            .zip(sample_weights)
            .map(|((row, &label), &sw)| {
                let z = row
                    .iter()
                    .map(|&(idx, x)| weights.coefficients()[idx] * x)
                    .sum::<f64>()
                    + weights.bias();
                // log(1 + e^z) - y·z, written to avoid overflow
                let softplus = if z > 0.0 {
                    z + (-z).exp().ln_1p()
                } else {
                    z.exp().ln_1p()
                };
                sw * (softplus - if label { z } else { 0.0 })
            })
            .sum();
        let penalty: f64 = weights.coefficients().iter().map(|w| w * w).sum();
        data_loss / n + penalty / (2.0 * self.c * n)
    }
}

/// Split sample indices into `(train, test)` keeping the class ratio.
///
/// Each class is shuffled with a generator seeded from `seed` and the first
/// `round(test_size · n_class)` indices go to the test set, always leaving at
/// least one training sample per class. Both halves are returned sorted.
pub fn stratified_split(labels: &[bool], test_size: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in [false, true] {
        let mut indices: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == class)
            .map(|(i, _)| i)
            .collect();
        indices.shuffle(&mut rng);

        let n_test = ((indices.len() as f64 * test_size).round() as usize)
            .min(indices.len().saturating_sub(1));
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    (train, test)
}

/// Share of samples whose predicted class matches the label.
pub fn accuracy(weights: &ModelWeights, features: &[FeatureVector], labels: &[bool]) -> Result<f64> {
    if features.is_empty() {
        return Ok(0.0);
    }
    let mut correct = 0usize;
    for (f, &label) in features.iter().zip(labels) {
        let predicted_fake = weights.score(f)?.0 > 0.0;
        if predicted_fake == label {
            correct += 1;
        }
    }
    Ok(correct as f64 / features.len() as f64)
}

/// Train a model artifact from labelled postings.
pub fn train(
    records: &[JobPostingRecord],
    normalizer: Normalizer,
    config: &TrainingConfig,
) -> Result<(JobPostingModel, TrainingReport)> {
    config.validate()?;
    if records.len() < 2 {
        return Err(MLError::InsufficientTrainingData {
            min_samples: 2,
            actual: records.len(),
        }
        .into());
    }

    let texts: Vec<String> = records.iter().map(JobPostingRecord::combined_text).collect();
    let labels: Vec<bool> = records.iter().map(|r| r.is_fake).collect();

    let (train_idx, test_idx) = stratified_split(&labels, config.test_size, config.seed);
    log::info!(
        "Training on {} postings, evaluating on {}",
        train_idx.len(),
        test_idx.len()
    );

    let select = |indices: &[usize]| -> (Vec<String>, Vec<bool>) {
        indices
            .iter()
            .map(|&i| (texts[i].clone(), labels[i]))
            .unzip()
    };
    let (train_texts, train_labels) = select(&train_idx);
    let (test_texts, test_labels) = select(&test_idx);

    let train_tokens = tokenize_all(&normalizer, &train_texts)?;
    let vocabulary = Vocabulary::fit(&train_tokens, &config.vocabulary)?;
    log::info!("Fitted vocabulary with {} terms", vocabulary.len());

    let vectorizer = TfIdfVectorizer::new(normalizer.clone(), Arc::new(vocabulary));
    let train_features = vectorizer.transform_batch(&train_tokens);

    let trainer = LogisticRegressionTrainer::new(config);
    let (weights, stats) = trainer.fit(&train_features, &train_labels)?;

    let train_accuracy = accuracy(&weights, &train_features, &train_labels)?;
    let test_accuracy = if test_texts.is_empty() {
        None
    } else {
        let test_tokens = tokenize_all(&normalizer, &test_texts)?;
        let test_features = vectorizer.transform_batch(&test_tokens);
        Some(accuracy(&weights, &test_features, &test_labels)?)
    };

    log::info!("Training accuracy: {:.2}%", train_accuracy * 100.0);
    if let Some(test_accuracy) = test_accuracy {
        log::info!("Testing accuracy: {:.2}%", test_accuracy * 100.0);
    }

    let metadata = TrainingMetadata {
        trained_at: chrono::Utc::now(),
        training_examples: train_idx.len(),
        test_examples: test_idx.len(),
        train_accuracy,
        test_accuracy,
        max_features: config.vocabulary.max_features,
        ngram_range: config.vocabulary.ngram_range,
        c: config.c,
        max_iter: config.max_iter,
        seed: config.seed,
    };

    let vocabulary = vectorizer.vocabulary().as_ref().clone();
    let model = JobPostingModel::new(vocabulary, weights, Some(metadata.clone()))?;
    Ok((model, TrainingReport { metadata, stats }))
}
