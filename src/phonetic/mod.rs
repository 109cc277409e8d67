//! Phonetic encoding.
//!
//! A [`PhoneticEncoder`] maps a word to the codes it is indexed under. Codes
//! are the keys of the inverted index, so an encoder must be a pure,
//! deterministic function: the same word always yields the same codes, in
//! every indexing run and at query time.
//!
//! # Examples
//!
//! ```
//! use argent::phonetic::{DoubleMetaphone, PhoneticEncoder};
//!
//! let encoder = DoubleMetaphone::new();
//! let codes = encoder.encode("Schmidt");
//! assert_eq!(codes.primary, "XMT");
//! assert_eq!(codes.secondary.as_deref(), Some("SMT"));
//!
//! let keys: Vec<&str> = codes.keys().collect();
//! assert_eq!(keys, vec!["XMT", "SMT"]);
//! ```

pub mod double_metaphone;

pub use double_metaphone::DoubleMetaphone;

use serde::{Deserialize, Serialize};

/// The codes of one word: a primary and an optional alternate pronunciation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneticCodes {
    pub primary: String,
    pub secondary: Option<String>,
}

impl PhoneticCodes {
    pub fn new<S: Into<String>>(primary: S, secondary: Option<String>) -> Self {
        PhoneticCodes {
            primary: primary.into(),
            secondary,
        }
    }

    /// The non-empty codes, primary first. Each one is an index key.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str())
            .chain(self.secondary.as_deref())
            .filter(|code| !code.is_empty())
    }
}

/// Trait for phonetic encoders.
pub trait PhoneticEncoder: Send + Sync {
    /// Encode a single word.
    fn encode(&self, word: &str) -> PhoneticCodes;

    /// Get the name of this encoder (for debugging and configuration).
    fn name(&self) -> &'static str;
}
