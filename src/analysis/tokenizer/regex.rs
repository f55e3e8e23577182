//! Regex-based tokenizer.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{JobGuardError, Result};

/// Emits every match of a pattern as a token, with byte offsets.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Runs of word characters (`\w+`).
    pub fn new() -> Result<Self> {
        Self::with_pattern(r"\w+")
    }

    /// Runs of non-whitespace, i.e. split on whitespace.
    pub fn whitespace() -> Result<Self> {
        Self::with_pattern(r"\S+")
    }

    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| JobGuardError::analysis(format!("Invalid regex pattern: {e}")))?;
        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, m)| Token::with_offsets(m.as_str(), position, m.start(), m.end()))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_pattern_offsets() {
        let tokenizer = RegexTokenizer::new().unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("apply now").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 5));
        assert_eq!(tokens[1].text, "now");
        assert_eq!(tokens[1].position, 1);
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (6, 9));
    }

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = RegexTokenizer::whitespace().unwrap();
        let texts: Vec<String> = tokenizer
            .tokenize("  earn 5000 \n weekly\t")
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(texts, vec!["earn", "5000", "weekly"]);
        assert_eq!(tokenizer.pattern(), r"\S+");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(RegexTokenizer::with_pattern("(").is_err());
        assert_eq!(RegexTokenizer::new().unwrap().name(), "regex");
    }
}
