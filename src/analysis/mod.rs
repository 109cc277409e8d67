//! Text analysis for phonetic indexing.
//!
//! This module turns free text into the words that get phonetically encoded.
//! The building blocks are the usual analysis stages (char filters, a
//! tokenizer, token filters) composed by a [`PipelineAnalyzer`]; the
//! [`WordFilter`] assembles them into the indexing policy.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
pub mod word_filter;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
pub use word_filter::{WordFilter, WordFilterConfig};
