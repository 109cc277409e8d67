//! Indexer configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::WordFilterConfig;
use crate::error::{ArgentError, Result};
use crate::timestamp::EPOCH_CURSOR;

/// Configuration shared by the indexer and the searcher.
///
/// Every field has a default, so a configuration file only needs to name
/// what it changes:
///
/// ```json
/// { "word_filter": { "min_length": 4, "common_words": ["harbour"] } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Word extraction policy.
    pub word_filter: WordFilterConfig,

    /// Cursor assumed when the store has none for the namespace.
    pub default_cursor: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        IndexerConfig {
            word_filter: WordFilterConfig::default(),
            default_cursor: EPOCH_CURSOR.to_string(),
        }
    }
}

impl IndexerConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ArgentError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
            .map_err(|e| ArgentError::config(format!("{}: {e}", path.display())))
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
