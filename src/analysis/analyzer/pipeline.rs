//! Composable analyzer: char filters, then a tokenizer, then token filters.
//!
//! Stages run strictly in insertion order, so a char filter that strips
//! markup must be added before one that strips punctuation.
//!
//! ```
//! use std::sync::Arc;
//!
//! use jobguard::analysis::analyzer::Analyzer;
//! use jobguard::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use jobguard::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//! use jobguard::analysis::token_filter::lowercase::LowercaseFilter;
//! use jobguard::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::whitespace().unwrap()))
//!     .add_char_filter(Arc::new(PatternReplaceCharFilter::html_tags().unwrap()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .named("markup_aware");
//!
//! let texts: Vec<String> = analyzer
//!     .analyze("<li>Remote</li><li>Full-time</li>")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(texts, vec!["remote", "full-time"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

#[derive(Clone)]
pub struct PipelineAnalyzer {
    name: String,
    char_filters: Vec<Arc<dyn CharFilter>>,
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stages: Vec<&str> = self
            .char_filters
            .iter()
            .map(|c| c.name())
            .chain(std::iter::once(self.tokenizer.name()))
            .chain(self.filters.iter().map(|f| f.name()))
            .collect();
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("stages", &stages)
            .finish()
    }
}

impl PipelineAnalyzer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: tokenizer.name().to_string(),
            char_filters: Vec::new(),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Append a char filter, run before tokenization.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Append a token filter, run after tokenization.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn named<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn pipeline_name(&self) -> &str {
        &self.name
    }

    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut cleaned = text.to_string();
        for char_filter in &self.char_filters {
            cleaned = char_filter.filter(&cleaned);
        }

        self.filters
            .iter()
            .try_fold(self.tokenizer.tokenize(&cleaned)?, |stream, filter| {
                filter.filter(stream)
            })
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
    use crate::analysis::token_filter::lowercase::LowercaseFilter;
    use crate::analysis::token_filter::stop::StopFilter;
    use crate::analysis::tokenizer::regex::RegexTokenizer;

    fn texts(analyzer: &PipelineAnalyzer, input: &str) -> Vec<String> {
        analyzer.analyze(input).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_filters_run_after_tokenizer() {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new().unwrap()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])));

        assert_eq!(
            texts(&analyzer, "Pay THE fee AND start"),
            vec!["pay", "fee", "start"]
        );
        assert_eq!(analyzer.filters().len(), 2);
        assert_eq!(analyzer.pipeline_name(), "regex");
    }

    #[test]
    fn test_char_filters_run_in_order() {
        // tags must go before punctuation, or "<br>" leaves "br" behind
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::whitespace().unwrap()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::html_tags().unwrap()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::punctuation().unwrap()))
            .named("ordered");

        assert_eq!(texts(&analyzer, "salary<br>bonus!"), vec!["salary", "bonus"]);
        assert_eq!(analyzer.char_filters().len(), 2);
        assert_eq!(analyzer.pipeline_name(), "ordered");

        let reversed = PipelineAnalyzer::new(Arc::new(RegexTokenizer::whitespace().unwrap()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::punctuation().unwrap()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::html_tags().unwrap()));
        assert_eq!(texts(&reversed, "salary<br>bonus!"), vec!["salary", "br", "bonus"]);
    }

    #[test]
    fn test_empty_text_yields_no_tokens() {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::whitespace().unwrap()));
        assert!(texts(&analyzer, "   ").is_empty());
        assert_eq!(analyzer.name(), "pipeline");
    }
}
