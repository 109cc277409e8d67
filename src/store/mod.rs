//! Index stores.
//!
//! A store keeps two kinds of state per namespace: the cursor
//! (`"{namespace}:last"`) and one score-ordered bucket per phonetic code
//! (`"{namespace}:{code}"`). The indexer writes through the
//! [`IndexStore`] trait, so any backend with sorted-set semantics can
//! stand in for the ones shipped here.
//!
//! # Examples
//!
//! ```
//! use argent::store::{IndexStore, InvertedIndexStore, StoreConfig, open_store};
//!
//! let store = open_store(&StoreConfig::memory()).unwrap();
//! store.upsert("photos", "PRT", "a", 1577923200).unwrap();
//! assert_eq!(store.top("photos", "PRT", 10).unwrap()[0].member, "a");
//! store.close().unwrap();
//! ```

pub mod file;
pub mod keyspace;
pub mod memory;
pub mod sorted_set;
pub mod traits;

use std::sync::Arc;

// Re-export commonly used types
pub use file::FileStore;
pub use memory::MemoryStore;
pub use sorted_set::SortedSet;
pub use traits::*;

use crate::error::{ArgentError, Result};

/// Open the store described by `config`.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn IndexStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::File => {
            let path = config
                .path
                .as_ref()
                .ok_or_else(|| ArgentError::config("File store requires a path"))?;
            Ok(Arc::new(FileStore::open_with(path, config.sync_writes)?))
        }
    }
}
