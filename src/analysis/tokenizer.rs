//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first token-producing step in the analysis pipeline,
//! responsible for splitting (already char-filtered) text into tokens.
//!
//! # Available Tokenizers
//!
//! - [`regex::RegexTokenizer`] - Regex-based tokenization
//!
//! # Examples
//!
//! ```
//! use jobguard::analysis::tokenizer::Tokenizer;
//! use jobguard::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::whitespace().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello   world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a tokenizer can be shared by every
/// concurrent request through the analyzer.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
