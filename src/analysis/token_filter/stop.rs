//! Stop filter implementation.
//!
//! Removes common words that would otherwise fill the phonetic buckets with
//! near-universal matches. Ships a default English common-word list; any
//! other list can be supplied at construction.
//!
//! # Examples
//!
//! ```
//! use argent::analysis::token_filter::Filter;
//! use argent::analysis::token_filter::stop::StopFilter;
//! use argent::analysis::token::Token;
//!
//! let filter = StopFilter::new();
//! let tokens = vec![
//!     Token::new("about", 0),
//!     Token::new("Lighthouse", 1),
//!     Token::new("there", 2)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "Lighthouse");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default English common-word list.
///
/// High-frequency English words, lower-case. Matching is exact unless case
/// folding is enabled, so only lower-case occurrences are removed by default.
pub const COMMON_ENGLISH_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "along", "also",
    "although", "always", "am", "among", "an", "and", "another", "any", "anyone", "anything",
    "are", "around", "as", "at", "away", "back", "be", "because", "been", "before", "being",
    "below", "between", "both", "but", "by", "came", "can", "cannot", "could", "did", "does",
    "doing", "done", "down", "during", "each", "either", "else", "enough", "even", "ever",
    "every", "few", "first", "for", "from", "further", "get", "gets", "getting", "give", "given",
    "goes", "going", "gone", "good", "got", "great", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in",
    "into", "is", "it", "its", "itself", "just", "last", "least", "less", "like", "little",
    "made", "make", "makes", "making", "many", "may", "maybe", "me", "might", "more", "most",
    "much", "must", "my", "myself", "never", "new", "next", "no", "nor", "not", "nothing",
    "now", "of", "off", "often", "old", "on", "once", "one", "only", "or", "other", "others",
    "otherwise", "our", "ours", "ourselves", "out", "over", "own", "perhaps", "please",
    "quite", "rather", "really", "said", "same", "say", "says", "see", "seen", "several",
    "shall", "she", "should", "since", "so", "some", "someone", "something", "sometimes",
    "still", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "therefore", "these", "they", "thing", "things", "think", "this", "those",
    "though", "three", "through", "thus", "to", "today", "together", "too", "took", "toward",
    "towards", "two", "under", "until", "up", "upon", "us", "used", "using", "very", "was",
    "way", "we", "well", "went", "were", "what", "whatever", "when", "whenever", "where",
    "whereas", "whether", "which", "while", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yes", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Default English common words as a HashSet.
pub static COMMON_ENGLISH_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    COMMON_ENGLISH_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes stop words from the token stream.
///
/// A token is removed when it equals a list entry exactly. With
/// `ignore_case(true)` matching folds ASCII case, so a title-cased "About"
/// is as much a stop word as "about".
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove, as supplied
    stop_words: Arc<HashSet<String>>,
    /// The same set folded to ASCII lower-case
    folded: Arc<HashSet<String>>,
    /// Whether matching folds ASCII case
    ignore_case: bool,
}

impl StopFilter {
    /// Create a new stop filter with the default English common words.
    pub fn new() -> Self {
        Self::with_stop_words(COMMON_ENGLISH_WORDS_SET.clone())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        let folded = stop_words.iter().map(|w| w.to_ascii_lowercase()).collect();
        StopFilter {
            stop_words: Arc::new(stop_words),
            folded: Arc::new(folded),
            ignore_case: false,
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Set whether matching folds ASCII case.
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        if self.ignore_case {
            self.folded.contains(&word.to_ascii_lowercase())
        } else {
            self.stop_words.contains(word)
        }
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| !self.is_stop_word(&token.text))
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
