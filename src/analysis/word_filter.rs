//! Word extraction for phonetic indexing.
//!
//! [`WordFilter`] turns a record's free text into the words worth encoding:
//!
//! 1. one trailing file extension is removed (`"Sunset.jpg"` → `"Sunset"`);
//! 2. the text is split on anything that is not an ASCII letter;
//! 3. empty tokens are dropped, and so are tokens shorter than the minimum
//!    length unless they are in capitalized form;
//! 4. common words are dropped.
//!
//! Order and duplicates are preserved.
//!
//! # Examples
//!
//! ```
//! use argent::analysis::word_filter::WordFilter;
//!
//! let filter = WordFilter::new().unwrap();
//! assert_eq!(filter.filter("Bright Sunset.jpg").unwrap(), vec!["Bright", "Sunset"]);
//! assert!(filter.filter("2024-05-01 / 42").unwrap().is_empty());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::PatternReplaceCharFilter;
use crate::analysis::char_filter::pattern_replace::FILE_EXTENSION_PATTERN;
use crate::analysis::token_filter::short_word::DEFAULT_MIN_LENGTH;
use crate::analysis::token_filter::stop::COMMON_ENGLISH_WORDS;
use crate::analysis::token_filter::{RemoveEmptyFilter, ShortWordFilter, StopFilter};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::tokenizer::regex::ALPHABETIC_PATTERN;
use crate::error::Result;

/// Configuration of the word extraction policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordFilterConfig {
    /// Words shorter than this are kept only when capitalized.
    pub min_length: usize,

    /// Pattern of the suffix stripped from the end of the text.
    pub extension_pattern: String,

    /// Pattern of a word; everything between matches is a separator.
    pub word_pattern: String,

    /// Common words to drop. `None` uses the bundled English list.
    pub common_words: Option<Vec<String>>,

    /// Whether common words match regardless of ASCII case. Off by default:
    /// a word is common only when it equals a list entry exactly.
    pub ignore_case: bool,
}

impl Default for WordFilterConfig {
    fn default() -> Self {
        WordFilterConfig {
            min_length: DEFAULT_MIN_LENGTH,
            extension_pattern: FILE_EXTENSION_PATTERN.to_string(),
            word_pattern: ALPHABETIC_PATTERN.to_string(),
            common_words: None,
            ignore_case: false,
        }
    }
}

/// Extracts candidate index words from free text.
#[derive(Clone, Debug)]
pub struct WordFilter {
    analyzer: PipelineAnalyzer,
    config: WordFilterConfig,
}

impl WordFilter {
    /// Create a word filter with the default policy.
    pub fn new() -> Result<Self> {
        Self::with_config(WordFilterConfig::default())
    }

    /// Create a word filter from a configuration.
    ///
    /// Fails with an analysis error when one of the patterns is not a valid
    /// regular expression.
    pub fn with_config(config: WordFilterConfig) -> Result<Self> {
        let extension =
            PatternReplaceCharFilter::new(&config.extension_pattern, "")?.first_only(true);
        let tokenizer = RegexTokenizer::with_pattern(&config.word_pattern)?;

        let stop = match &config.common_words {
            Some(words) => StopFilter::from_words(words.iter().cloned()),
            None => StopFilter::from_words(COMMON_ENGLISH_WORDS.iter().copied()),
        }
        .ignore_case(config.ignore_case);

        let analyzer = PipelineAnalyzer::new(Arc::new(tokenizer))
            .add_char_filter(Arc::new(extension))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .add_filter(Arc::new(ShortWordFilter::with_min_length(config.min_length)))
            .add_filter(Arc::new(stop))
            .with_name("word_filter");

        Ok(WordFilter { analyzer, config })
    }

    /// Extract the index words of `text`, in order, duplicates included.
    pub fn filter(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    pub fn config(&self) -> &WordFilterConfig {
        &self.config
    }

    /// The underlying analysis pipeline.
    pub fn analyzer(&self) -> &PipelineAnalyzer {
        &self.analyzer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArgentError;

    fn words(text: &str) -> Vec<String> {
        WordFilter::new().unwrap().filter(text).unwrap()
    }

    #[test]
    fn test_extension_stripped_once() {
        assert_eq!(words("Bright Sunset.jpg"), vec!["Bright", "Sunset"]);
        // Only the last suffix goes; "tar" is then a short lowercase word.
        assert_eq!(words("Backups.tar.gz"), vec!["Backups"]);
        assert_eq!(words("Welcome.html"), vec!["Welcome"]);
    }

    #[test]
    fn test_extension_must_be_anchored() {
        // ".jpg" is not at the end, so "jpg" stays a (short, dropped) token.
        assert_eq!(words("Harbour.jpg copy"), vec!["Harbour"]);
        assert_eq!(words("Photograph.jpeg"), vec!["Photograph"]);
        // Five letters is not an extension.
        assert_eq!(words("Config.backup"), vec!["Config", "backup"]);
    }

    #[test]
    fn test_split_on_non_letters() {
        assert_eq!(
            words("lighthouse_2041-harbour(final)"),
            vec!["lighthouse", "harbour", "final"]
        );
    }

    #[test]
    fn test_short_words() {
        assert_eq!(words("Bob saw a big cat near Kent"), vec!["Bob", "Kent"]);
        assert_eq!(words("NASA rocket"), vec!["rocket"]);
    }

    #[test]
    fn test_common_words_dropped() {
        assert_eq!(words("there would never be another Lighthouse"), vec!["Lighthouse"]);
    }

    #[test]
    fn test_common_words_match_exactly() {
        assert_eq!(words("About Harbour"), vec!["About", "Harbour"]);
        assert_eq!(words("about Harbour"), vec!["Harbour"]);

        let config = WordFilterConfig {
            common_words: Some(vec!["Paris".to_string()]),
            ..WordFilterConfig::default()
        };
        let filter = WordFilter::with_config(config).unwrap();
        assert_eq!(
            filter.filter("paris PARIS Paris").unwrap(),
            vec!["paris", "PARIS"]
        );
    }

    #[test]
    fn test_duplicates_and_order_preserved() {
        assert_eq!(
            words("sunset harbour sunset"),
            vec!["sunset", "harbour", "sunset"]
        );
    }

    #[test]
    fn test_empty_and_non_alphabetic() {
        assert!(words("").is_empty());
        assert!(words("   ").is_empty());
        assert!(words("2024-05-01 12:00 #42").is_empty());
    }

    #[test]
    fn test_custom_config() {
        let config = WordFilterConfig {
            min_length: 3,
            common_words: Some(vec!["harbour".to_string()]),
            ..WordFilterConfig::default()
        };
        let filter = WordFilter::with_config(config).unwrap();
        assert_eq!(filter.filter("the big harbour").unwrap(), vec!["the", "big"]);
    }

    #[test]
    fn test_case_insensitive_common_words() {
        let config = WordFilterConfig {
            ignore_case: true,
            ..WordFilterConfig::default()
        };
        let filter = WordFilter::with_config(config).unwrap();
        assert!(filter.filter("About about").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let config = WordFilterConfig {
            extension_pattern: "(".to_string(),
            ..WordFilterConfig::default()
        };
        let err = WordFilter::with_config(config).unwrap_err();
        assert!(matches!(err, ArgentError::Analysis(_)));
        assert!(err.to_string().contains("Invalid regex pattern"));
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let config: WordFilterConfig = serde_json::from_str(r#"{"min_length": 4}"#).unwrap();
        assert_eq!(config.min_length, 4);
        assert_eq!(config.extension_pattern, FILE_EXTENSION_PATTERN);
        assert!(!config.ignore_case);
    }
}
