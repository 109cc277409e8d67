//! # Argent
//!
//! Incremental phonetic indexing of record feeds.
//!
//! Argent keeps a fuzzy, sounds-like index over records coming from any
//! source that can answer "what changed since T". Each pass picks up the
//! records newer than the stored cursor, extracts their meaningful words,
//! encodes every word with Double Metaphone, and files the record id under
//! each code, scored by the record's timestamp. Looking up a code then yields
//! the most recent records containing a word that sounds alike.
//!
//! ## Features
//!
//! - Cursor-based incremental passes that never re-read old records
//! - Configurable word extraction (extension stripping, short and common words)
//! - Double Metaphone with primary and alternate codes
//! - In-memory and file-backed stores behind one trait
//! - Concurrent passes over distinct indexes
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use argent::index::{IndexDescriptor, Indexer, PhoneticSearcher};
//! use argent::record::FieldNames;
//! use argent::source::MemorySource;
//! use argent::store::MemoryStore;
//! use serde_json::json;
//!
//! let source = MemorySource::with_records(
//!     "created_time",
//!     vec![json!({"id": "a", "created_time": "2020-01-02", "caption": "Bright Sunset.jpg"})],
//! );
//! let store = Arc::new(MemoryStore::new());
//!
//! let indexer = Indexer::new(IndexDescriptor::new("photos", "created_time", source), store.clone())?;
//! indexer.run_pass(&FieldNames::new("id", "caption"))?;
//!
//! let searcher = PhoneticSearcher::new("photos", store)?;
//! let hits = searcher.search("Brite", 10)?;
//! assert_eq!(hits[0].id, "a");
//! # Ok::<(), argent::error::ArgentError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod index;
pub mod phonetic;
pub mod record;
pub mod source;
pub mod store;
pub mod timestamp;

pub mod prelude {
    pub use crate::analysis::{WordFilter, WordFilterConfig};
    pub use crate::error::{ArgentError, Result};
    pub use crate::index::{
        Hit, IndexDescriptor, Indexer, IndexerConfig, PassReport, PhoneticSearcher, run_parallel,
    };
    pub use crate::phonetic::{DoubleMetaphone, PhoneticCodes, PhoneticEncoder};
    pub use crate::record::{FieldAccessor, FieldNames, Record, RecordFields};
    pub use crate::source::{JsonlSource, MemorySource, RecordSource};
    pub use crate::store::{
        CursorStore, FileStore, IndexStore, InvertedIndexStore, MemoryStore, StoreConfig,
        open_store,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
