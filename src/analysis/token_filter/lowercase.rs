//! Case folding.
//!
//! Postings shout (`URGENT`, `Wire Transfer`), so every token is folded to
//! lowercase before stop word lookup and vocabulary matching.
//!
//! ```
//! use jobguard::analysis::token_filter::Filter;
//! use jobguard::analysis::token_filter::lowercase::LowercaseFilter;
//! use jobguard::analysis::token::Token;
//!
//! let stream = Box::new(vec![Token::new("URGENT", 0), Token::new("Hiring", 1)].into_iter());
//! let folded: Vec<String> = LowercaseFilter::new()
//!     .filter(stream)
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(folded, vec!["urgent", "hiring"]);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Folds token text to lowercase; stopped tokens pass through untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }

    fn fold(token: Token) -> Token {
        if token.is_stopped() || !token.text.chars().any(char::is_uppercase) {
            return token;
        }
        let folded = token.text.to_lowercase();
        Token {
            text: folded,
            ..token
        }
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(Self::fold)))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
