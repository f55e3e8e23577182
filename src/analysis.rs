//! Text analysis module for jobguard.
//!
//! This module turns raw posting text into normalized tokens: char filters
//! strip markup and punctuation, a tokenizer splits the text and token
//! filters lowercase, remove stop words and drop very short tokens.

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::Analyzer;
pub use analyzer::job_posting::JobPostingAnalyzer;
pub use normalizer::{NormalizedTokens, Normalizer};
pub use token::{Token, TokenStream};
