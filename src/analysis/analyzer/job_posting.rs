//! Analyzer tuned for pasted job posting text.
//!
//! # Pipeline
//!
//! 1. PatternReplaceCharFilter (markup tags → space)
//! 2. PatternReplaceCharFilter (character entities → space)
//! 3. PatternReplaceCharFilter (non-alphanumeric → space)
//! 4. RegexTokenizer (whitespace separated runs)
//! 5. LowercaseFilter
//! 6. StopFilter (English stop words)
//! 7. MinLengthFilter (drops tokens shorter than 2 characters)
//!
//! ```
//! use jobguard::analysis::analyzer::Analyzer;
//! use jobguard::analysis::analyzer::job_posting::JobPostingAnalyzer;
//!
//! let analyzer = JobPostingAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer
//!     .analyze("<p>Earn $5000 weekly &amp; no experience needed!</p>")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(tokens, vec!["earn", "5000", "weekly", "experience", "needed"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::min_length::{DEFAULT_MIN_TOKEN_LENGTH, MinLengthFilter};
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// The analyzer used for both training and inference on job postings.
#[derive(Clone, Debug)]
pub struct JobPostingAnalyzer {
    inner: PipelineAnalyzer,
}

impl JobPostingAnalyzer {
    /// Create a new analyzer with default settings.
    pub fn new() -> Result<Self> {
        Self::with_options(StopFilter::new(), DEFAULT_MIN_TOKEN_LENGTH)
    }

    /// Create an analyzer with a custom stop filter and minimum token length.
    pub fn with_options(stop_filter: StopFilter, min_length: usize) -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::whitespace()?);
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(PatternReplaceCharFilter::html_tags()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::html_entities()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::punctuation()?))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(stop_filter))
            .add_filter(Arc::new(MinLengthFilter::new(min_length)))
            .named("job_posting");

        Ok(JobPostingAnalyzer { inner: analyzer })
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Default for JobPostingAnalyzer {
    fn default() -> Self {
        Self::new().expect("Job posting analyzer should be creatable with default settings")
    }
}

impl Analyzer for JobPostingAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "job_posting"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(analyzer: &JobPostingAnalyzer, input: &str) -> Vec<String> {
        analyzer.analyze(input).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_strips_markup_and_punctuation() {
        let analyzer = JobPostingAnalyzer::new().unwrap();
        assert_eq!(
            texts(&analyzer, "<b>URGENT:</b> wire-transfer required!!!"),
            vec!["urgent", "wire", "transfer", "required"]
        );
    }

    #[test]
    fn test_drops_stop_words_and_short_tokens() {
        let analyzer = JobPostingAnalyzer::new().unwrap();
        assert_eq!(
            texts(&analyzer, "We are a team of 5 in the US"),
            vec!["team"]
        );
    }

    #[test]
    fn test_custom_options() {
        let analyzer =
            JobPostingAnalyzer::with_options(StopFilter::from_words(vec!["team"]), 1).unwrap();
        assert_eq!(texts(&analyzer, "a team"), vec!["a"]);
        assert_eq!(analyzer.inner().filters().len(), 3);
    }

    #[test]
    fn test_deterministic() {
        let analyzer = JobPostingAnalyzer::default();
        let text = "Competitive salary, benefits & remote position.";
        assert_eq!(texts(&analyzer, text), texts(&analyzer, text));
        assert_eq!(analyzer.name(), "job_posting");
    }
}
