//! Short word filter implementation.
//!
//! Short words are usually too common to be worth a phonetic bucket, unless
//! they look like a name. "Looks like a name" is approximated as "is already
//! in capitalized form": first letter upper-case and every other letter
//! lower-case. So `Bob` and `Kent` survive while `cat`, `NASA` and `iPod`
//! do not. Words at least `min_length` characters long always survive.
//!
//! # Examples
//!
//! ```
//! use argent::analysis::token_filter::Filter;
//! use argent::analysis::token_filter::short_word::ShortWordFilter;
//! use argent::analysis::token::Token;
//!
//! let filter = ShortWordFilter::new();
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("Bob", 1),
//!     Token::new("sunset", 2),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(result, vec!["Bob", "sunset"]);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Words shorter than this must be capitalized to be kept.
pub const DEFAULT_MIN_LENGTH: usize = 5;

/// A filter that drops short tokens unless they are in capitalized form.
#[derive(Clone, Debug)]
pub struct ShortWordFilter {
    min_length: usize,
}

impl ShortWordFilter {
    /// Create a filter with the default minimum length of 5.
    pub fn new() -> Self {
        Self::with_min_length(DEFAULT_MIN_LENGTH)
    }

    pub fn with_min_length(min_length: usize) -> Self {
        ShortWordFilter { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Whether `word` would be kept by this filter.
    pub fn keeps(&self, word: &str) -> bool {
        word.chars().count() >= self.min_length || capitalize(word) == word
    }
}

impl Default for ShortWordFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for ShortWordFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens.filter(|token| self.keeps(&token.text)).collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "short_word"
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
