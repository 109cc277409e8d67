use regex::Regex;

use super::CharFilter;
use crate::error::{ArgentError, Result};

/// Pattern of a trailing file extension: a dot and one to four letters,
/// anchored at the end of the text.
pub const FILE_EXTENSION_PATTERN: &str = r"\.[a-zA-Z]{1,4}$";

/// A char filter that replaces text matching a regex pattern.
///
/// By default every match is replaced; [`first_only`](Self::first_only)
/// restricts it to the leftmost match.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
    first_only: bool,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| ArgentError::analysis(format!("Invalid regex pattern: {e}")))?,
            replacement: replacement.to_string(),
            first_only: false,
        })
    }

    /// A filter removing one trailing file extension ("photo.jpg" → "photo").
    pub fn file_extension() -> Result<Self> {
        Ok(Self::new(FILE_EXTENSION_PATTERN, "")?.first_only(true))
    }

    /// Replace only the leftmost match.
    pub fn first_only(mut self, first_only: bool) -> Self {
        self.first_only = first_only;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        let replacement = regex::NoExpand(&self.replacement);
        if self.first_only {
            self.pattern.replace(input, replacement).into_owned()
        } else {
            self.pattern.replace_all(input, replacement).into_owned()
        }
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}
