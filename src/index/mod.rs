//! Incremental phonetic indexing.
//!
//! An [`Indexer`] owns one [`IndexDescriptor`] and runs passes over it; a
//! [`PhoneticSearcher`] reads what the passes wrote. Several indexes can be
//! brought up to date at once with [`run_parallel`].

pub mod config;
pub mod descriptor;
pub mod indexer;
pub mod parallel;
pub mod searcher;

// Re-export commonly used types
pub use config::IndexerConfig;
pub use descriptor::IndexDescriptor;
pub use indexer::{Indexer, PassReport};
pub use parallel::{IndexJob, IndexPass, JobResult, ParallelIndexer, run_parallel};
pub use searcher::{Hit, PhoneticSearcher};
