//! Orchestration of a single prediction.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizedTokens;
use crate::config::ServiceConfig;
use crate::error::{JobGuardError, Result};
use crate::ml::attribution::{AttributionConfig, Flag, attribute};
use crate::ml::classifier::{ClassProbabilities, Classifier, Verdict};
use crate::ml::features::{extract, term_sequence};
use crate::service::context::ModelContext;
use crate::service::wordcloud::{BitmapWordCloud, WordCloudRenderer};

/// Message returned for blank submissions.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a job description.";

const HUNDREDTHS: i64 = 10_000;

/// Class probabilities as percentages with two decimals, summing to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub real: f64,
    pub fake: f64,
}

impl Probabilities {
    /// Round to hundredths of a percent.
    ///
    /// When the two rounded values miss 100.00, the difference goes to the
    /// class with the larger raw probability (REAL on an exact tie).
    pub fn from_class_probabilities(probs: ClassProbabilities) -> Self {
        let (real, fake) = Self::hundredths(probs);
        Probabilities {
            real: real as f64 / 100.0,
            fake: fake as f64 / 100.0,
        }
    }

    fn hundredths(probs: ClassProbabilities) -> (i64, i64) {
        let mut real = (probs.real * HUNDREDTHS as f64).round() as i64;
        let mut fake = (probs.fake * HUNDREDTHS as f64).round() as i64;
        let remainder = HUNDREDTHS - real - fake;
        if remainder != 0 {
            if probs.fake > probs.real {
                fake += remainder;
            } else {
                real += remainder;
            }
        }
        (real, fake)
    }

    /// FAKE only when the fake percentage is strictly larger.
    pub fn verdict(&self) -> Verdict {
        if self.fake > self.real {
            Verdict::Fake
        } else {
            Verdict::Real
        }
    }
}

/// Everything returned for one posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Verdict,
    pub probabilities: Probabilities,
    pub red_flags: Vec<Flag>,
    pub green_flags: Vec<Flag>,
    /// Base64-encoded PNG, absent when not rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wordcloud: Option<String>,
}

/// Prediction facade over a shared [`ModelContext`].
#[derive(Clone)]
pub struct PredictionService {
    context: Arc<ModelContext>,
    config: ServiceConfig,
    attribution: AttributionConfig,
    renderer: Option<Arc<dyn WordCloudRenderer>>,
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("context", &self.context)
            .field("config", &self.config)
            .field("renderer", &self.renderer.as_ref().map(|r| r.name()))
            .finish()
    }
}

impl PredictionService {
    /// Create a service; the bitmap renderer is used when word clouds are enabled.
    pub fn new(context: Arc<ModelContext>, config: ServiceConfig) -> Self {
        let renderer: Option<Arc<dyn WordCloudRenderer>> = if config.wordcloud.enabled {
            Some(Arc::new(BitmapWordCloud::from_config(&config.wordcloud)))
        } else {
            None
        };
        let attribution = config.attribution();
        Self {
            context,
            config,
            attribution,
            renderer,
        }
    }

    /// Replace the word cloud renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn WordCloudRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Disable word clouds.
    pub fn without_wordcloud(mut self) -> Self {
        self.renderer = None;
        self
    }

    pub fn context(&self) -> &Arc<ModelContext> {
        &self.context
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Classify `text` without rendering a word cloud.
    pub fn classify(&self, text: &str) -> Result<PredictionResult> {
        self.analyze(text).map(|(result, _)| result)
    }

    /// Classify `text` and, when enabled and the text is long enough, attach
    /// a word cloud. Rendering problems never fail the prediction.
    pub async fn predict(&self, text: &str) -> Result<PredictionResult> {
        let (mut result, tokens) = self.analyze(text)?;

        if let Some(renderer) = &self.renderer {
            if text.trim().chars().count() < self.config.wordcloud.min_text_chars {
                debug!("Skipping word cloud for short input");
            } else if tokens.is_empty() {
                debug!("Skipping word cloud: no tokens left after normalization");
            } else {
                result.wordcloud = self.render_wordcloud(Arc::clone(renderer), tokens).await;
            }
        }

        Ok(result)
    }

    fn analyze(&self, text: &str) -> Result<(PredictionResult, NormalizedTokens)> {
        if text.trim().is_empty() {
            return Err(JobGuardError::invalid_input(EMPTY_INPUT_MESSAGE));
        }

        let vocabulary = self.context.vocabulary();
        let weights = self.context.weights();

        let tokens = self.context.normalizer().normalize(text)?;
        let terms = term_sequence(tokens.as_slice(), vocabulary.ngram_range());
        let features = extract(&terms, vocabulary);

        let score = weights.score(&features)?;
        let probabilities = Probabilities::from_class_probabilities(weights.calibrate(score));
        let attribution = attribute(&terms, vocabulary, weights, &features, &self.attribution);

        debug!(
            "Scored {} tokens ({} known terms): raw score {:.4}, fake {:.2}%",
            tokens.len(),
            features.nonzero_indices().count(),
            score.0,
            probabilities.fake
        );

        let result = PredictionResult {
            prediction: probabilities.verdict(),
            probabilities,
            red_flags: attribution.red_flags,
            green_flags: attribution.green_flags,
            wordcloud: None,
        };
        Ok((result, tokens))
    }

    async fn render_wordcloud(
        &self,
        renderer: Arc<dyn WordCloudRenderer>,
        tokens: NormalizedTokens,
    ) -> Option<String> {
        let timeout = Duration::from_millis(self.config.wordcloud.timeout_ms);
        let task = tokio::task::spawn_blocking(move || renderer.render(&tokens));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(Ok(png))) => Some(BASE64.encode(png)),
            Ok(Ok(Err(e))) => {
                warn!("Word cloud rendering failed: {e}");
                None
            }
            Ok(Err(e)) => {
                warn!("Word cloud task failed: {e}");
                None
            }
            Err(_) => {
                warn!("Word cloud rendering timed out after {timeout:?}");
                None
            }
        }
    }
}
