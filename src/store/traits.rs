//! Store abstraction traits and common types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Key suffix under which a namespace keeps its cursor.
pub const CURSOR_SUFFIX: &str = "last";

/// Key of the bucket holding the records indexed under `code`.
pub fn bucket_key(namespace: &str, code: &str) -> String {
    format!("{namespace}:{code}")
}

/// Key of the cursor of `namespace`.
pub fn cursor_key(namespace: &str) -> String {
    format!("{namespace}:{CURSOR_SUFFIX}")
}

/// A bucket member with its score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMember {
    pub member: String,
    pub score: i64,
}

impl ScoredMember {
    pub fn new<S: Into<String>>(member: S, score: i64) -> Self {
        ScoredMember {
            member: member.into(),
            score,
        }
    }
}

/// Persists the "last indexed timestamp" of each namespace.
pub trait CursorStore: Send + Sync + std::fmt::Debug {
    /// Get the raw cursor value, if one was ever stored.
    fn get_cursor(&self, namespace: &str) -> Result<Option<String>>;

    /// Replace the cursor value.
    fn set_cursor(&self, namespace: &str, value: &str) -> Result<()>;
}

/// Phonetic buckets: one score-ordered member set per `namespace:code`.
pub trait InvertedIndexStore: Send + Sync + std::fmt::Debug {
    /// Place `member` in the bucket with `score`, replacing the score of an
    /// existing member. The bucket is created on first write.
    fn upsert(&self, namespace: &str, code: &str, member: &str, score: i64) -> Result<()>;

    /// The `limit` highest-scored members of a bucket, highest first.
    fn top(&self, namespace: &str, code: &str, limit: usize) -> Result<Vec<ScoredMember>>;

    /// Score of a member, if it is in the bucket.
    fn score(&self, namespace: &str, code: &str, member: &str) -> Result<Option<i64>>;

    /// Number of members in a bucket. Absent buckets are empty.
    fn bucket_len(&self, namespace: &str, code: &str) -> Result<usize>;

    /// Codes that have a bucket in `namespace`, sorted.
    fn codes(&self, namespace: &str) -> Result<Vec<String>>;
}

/// A complete index store: cursors, buckets and lifecycle.
pub trait IndexStore: CursorStore + InvertedIndexStore {
    /// Flush pending writes to the backing medium.
    fn sync(&self) -> Result<()>;

    /// Flush and release the store. Any later call fails with a storage error.
    fn close(&self) -> Result<()>;

    /// Check if the store has been closed.
    fn is_closed(&self) -> bool;

    /// Get the name of this store type.
    fn store_type(&self) -> &'static str;
}

/// Available store backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local, lost on exit.
    #[default]
    Memory,
    /// JSON snapshot in a directory, guarded by a lock file.
    File,
}

/// Configuration for opening a store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Which backend to open.
    pub backend: StoreBackend,

    /// Directory of a file store.
    pub path: Option<PathBuf>,

    /// Whether to persist after every write instead of on sync/close.
    pub sync_writes: bool,
}

impl StoreConfig {
    /// Configuration of an in-memory store.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Configuration of a file store in `path`.
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        StoreConfig {
            backend: StoreBackend::File,
            path: Some(path.into()),
            sync_writes: false,
        }
    }

    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }
}
