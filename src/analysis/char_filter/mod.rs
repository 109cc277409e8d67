//! Char filters run on the raw text before it reaches the tokenizer.
//!
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement

pub mod pattern_replace;

pub use pattern_replace::PatternReplaceCharFilter;

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text, returning the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}
