//! Analyzer trait and implementations.
//!
//! Analyzers combine char filters, a tokenizer and token filters into a
//! complete text processing pipeline:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Tokens
//! ```
//!
//! # Available Implementations
//!
//! - [`pipeline::PipelineAnalyzer`] - Custom tokenizer + filter chains
//! - [`job_posting::JobPostingAnalyzer`] - The pipeline used for job postings
//!
//! # Examples
//!
//! ```
//! use jobguard::analysis::analyzer::Analyzer;
//! use jobguard::analysis::analyzer::job_posting::JobPostingAnalyzer;
//!
//! let analyzer = JobPostingAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Wire the TRANSFER fee!").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "wire");
//! assert_eq!(tokens[1].text, "transfer");
//! assert_eq!(tokens[2].text, "fee");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync`: one analyzer instance is shared by all
/// requests served by the process.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &'static str;
}

pub mod job_posting;
pub mod pipeline;
