//! Runtime configuration.
//!
//! The CLI layer builds these structs from its arguments (with environment
//! fallbacks); library users construct them directly or start from
//! [`Default`].

use serde::{Deserialize, Serialize};

use crate::error::{JobGuardError, Result};
use crate::ml::attribution::{AttributionConfig, DEFAULT_TOP_N};

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Prediction service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Maximum red and green flags returned per prediction.
    pub top_n: usize,
    /// Flags whose weight does not exceed this are dropped.
    pub min_weight: f64,
    /// Word cloud generation.
    pub wordcloud: WordCloudConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_weight: 0.0,
            wordcloud: WordCloudConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Attribution knobs derived from this config.
    pub fn attribution(&self) -> AttributionConfig {
        AttributionConfig {
            top_n: self.top_n,
            min_weight: self.min_weight,
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_weight.is_finite() && self.min_weight >= 0.0) {
            return Err(JobGuardError::config("min_weight must be a non-negative number"));
        }
        self.wordcloud.validate()
    }
}

/// Word cloud settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudConfig {
    pub enabled: bool,
    /// Give up on the image after this many milliseconds.
    pub timeout_ms: u64,
    /// Skip the image for inputs shorter than this (trimmed, in characters).
    pub min_text_chars: usize,
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 2000,
            min_text_chars: 10,
            width: 800,
            height: 400,
            max_words: 100,
        }
    }
}

impl WordCloudConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(JobGuardError::config("word cloud dimensions must be non-zero"));
        }
        if self.max_words == 0 {
            return Err(JobGuardError::config("max_words must be at least 1"));
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
