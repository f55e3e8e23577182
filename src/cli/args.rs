//! Command line argument parsing for the jobguard CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PORT, ServerConfig, ServiceConfig, WordCloudConfig};
use crate::ml::attribution::DEFAULT_TOP_N;
use crate::ml::training::TrainingConfig;
use crate::ml::vocabulary::{DEFAULT_MAX_FEATURES, NgramRange, VocabularyConfig};

/// jobguard - Fake job posting detector
#[derive(Parser, Debug, Clone)]
#[command(name = "jobguard")]
#[command(about = "Detect fake job postings with an explainable TF-IDF classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct JobGuardArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl JobGuardArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the prediction API over HTTP
    Serve(ServeArgs),

    /// Classify a single posting
    Predict(PredictArgs),

    /// Train a model from labelled postings
    Train(TrainArgs),

    /// Show model metadata and its strongest terms
    Inspect(InspectArgs),
}

/// Arguments for serving the API
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Model artifact (JSON)
    #[arg(short, long, env = "JOBGUARD_MODEL", value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Address to bind
    #[arg(long, env = "JOBGUARD_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "JOBGUARD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Maximum red and green flags per prediction
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Drop flags whose weight does not exceed this
    #[arg(long, default_value_t = 0.0)]
    pub min_weight: f64,

    /// Never render word clouds
    #[arg(long)]
    pub no_wordcloud: bool,

    /// Give up on a word cloud after this many milliseconds
    #[arg(long, default_value_t = 2000)]
    pub wordcloud_timeout_ms: u64,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            top_n: self.top_n,
            min_weight: self.min_weight,
            wordcloud: WordCloudConfig {
                enabled: !self.no_wordcloud,
                timeout_ms: self.wordcloud_timeout_ms,
                ..Default::default()
            },
        }
    }
}

/// Arguments for a one-off prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Model artifact (JSON)
    #[arg(short, long, env = "JOBGUARD_MODEL", value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Read the posting from a file instead of the command line
    #[arg(long, value_name = "TEXT_FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Maximum red and green flags
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Posting text (read from stdin when neither this nor --file is given)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Labelled postings (CSV with a header row, JSON array or JSON Lines)
    #[arg(short, long, value_name = "DATA_FILE")]
    pub data: PathBuf,

    /// Where to write the model artifact
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub output: PathBuf,

    /// Vocabulary size cap (0 keeps every term)
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    pub max_features: usize,

    /// Minimum document frequency of a term
    #[arg(long, default_value_t = 1)]
    pub min_df: usize,

    /// Largest n-gram size
    #[arg(long, default_value_t = 2)]
    pub max_ngram: usize,

    /// Fraction of postings held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_size: f64,

    /// Shuffle seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Inverse regularisation strength
    #[arg(short = 'c', long = "c", default_value_t = 1.0)]
    pub c: f64,

    /// Maximum gradient descent iterations
    #[arg(long, default_value_t = 1000)]
    pub max_iter: usize,

    /// Gradient descent step size
    #[arg(long, default_value_t = 0.5)]
    pub learning_rate: f64,

    /// Do not reweight classes
    #[arg(long)]
    pub unbalanced: bool,

    /// Overwrite an existing artifact
    #[arg(long)]
    pub force: bool,
}

impl TrainArgs {
    pub fn training_config(&self) -> crate::error::Result<TrainingConfig> {
        Ok(TrainingConfig {
            vocabulary: VocabularyConfig {
                ngram_range: NgramRange::new(1, self.max_ngram)?,
                max_features: (self.max_features > 0).then_some(self.max_features),
                min_df: self.min_df,
            },
            c: self.c,
            max_iter: self.max_iter,
            learning_rate: self.learning_rate,
            balanced: !self.unbalanced,
            test_size: self.test_size,
            seed: self.seed,
            ..Default::default()
        })
    }
}

/// Arguments for model inspection
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Model artifact (JSON)
    #[arg(short, long, env = "JOBGUARD_MODEL", value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Number of terms to list per class
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_serve_command() {
        let args = JobGuardArgs::try_parse_from([
            "jobguard",
            "serve",
            "--model",
            "model.json",
            "--port",
            "8080",
            "--no-wordcloud",
        ])
        .unwrap();

        if let Command::Serve(serve_args) = args.command {
            assert_eq!(serve_args.model, PathBuf::from("model.json"));
            assert_eq!(serve_args.server_config().port, 8080);
            let config = serve_args.service_config();
            assert!(!config.wordcloud.enabled);
            assert_eq!(config.top_n, 10);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_predict_command() {
        let args = JobGuardArgs::try_parse_from([
            "jobguard",
            "predict",
            "-m",
            "model.json",
            "Earn money from home",
            "-f",
            "json",
        ])
        .unwrap();

        assert!(matches!(args.output_format, OutputFormat::Json));
        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.text.as_deref(), Some("Earn money from home"));
            assert!(predict_args.file.is_none());
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_train_command() {
        let args = JobGuardArgs::try_parse_from([
            "jobguard",
            "train",
            "--data",
            "postings.jsonl",
            "--output",
            "model.json",
            "--max-features",
            "0",
            "--seed",
            "7",
        ])
        .unwrap();

        if let Command::Train(train_args) = args.command {
            let config = train_args.training_config().unwrap();
            assert_eq!(config.vocabulary.max_features, None);
            assert_eq!(config.seed, 7);
            assert!(config.balanced);
            assert_eq!(config.vocabulary.ngram_range, NgramRange::default());
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_verbosity() {
        let args = JobGuardArgs::try_parse_from(["jobguard", "-q", "inspect", "-m", "m.json"])
            .unwrap();
        assert_eq!(args.verbosity(), 0);

        let args = JobGuardArgs::try_parse_from(["jobguard", "-vvv", "inspect", "-m", "m.json"])
            .unwrap();
        assert_eq!(args.verbosity(), 3);
    }
}
