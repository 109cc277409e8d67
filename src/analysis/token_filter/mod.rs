//! Token filter implementations for token transformation.
//!
//! # Available Filters
//!
//! - [`remove_empty::RemoveEmptyFilter`] - Removes empty tokens
//! - [`short_word::ShortWordFilter`] - Removes short words that are not title-cased
//! - [`stop::StopFilter`] - Removes common words

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual filter modules
pub mod remove_empty;
pub mod short_word;
pub mod stop;

// Re-export all filters for convenient access
pub use remove_empty::RemoveEmptyFilter;
pub use short_word::ShortWordFilter;
pub use stop::StopFilter;
