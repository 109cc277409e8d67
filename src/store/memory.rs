//! In-memory store implementation for testing and short-lived indexes.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::error::{ArgentError, Result};
use crate::store::keyspace::KeySpace;
use crate::store::traits::{CursorStore, IndexStore, InvertedIndexStore, ScoredMember};

/// An in-memory index store.
///
/// Everything lives in the process and is gone once the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<KeySpace>,
    closed: AtomicBool,
}

impl MemoryStore {
    /// Create a new, empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the store is closed.
    fn check_closed(&self) -> Result<()> {
        if self.is_closed() {
            Err(ArgentError::storage("Store is closed"))
        } else {
            Ok(())
        }
    }

    /// Get the number of buckets across all namespaces.
    pub fn bucket_count(&self) -> usize {
        self.data.read().buckets.len()
    }

    /// Remove every cursor and bucket.
    pub fn clear(&self) -> Result<()> {
        self.check_closed()?;
        *self.data.write() = KeySpace::default();
        Ok(())
    }
}

impl CursorStore for MemoryStore {
    fn get_cursor(&self, namespace: &str) -> Result<Option<String>> {
        self.check_closed()?;
        Ok(self.data.read().get_cursor(namespace))
    }

    fn set_cursor(&self, namespace: &str, value: &str) -> Result<()> {
        self.check_closed()?;
        self.data.write().set_cursor(namespace, value);
        Ok(())
    }
}

impl InvertedIndexStore for MemoryStore {
    fn upsert(&self, namespace: &str, code: &str, member: &str, score: i64) -> Result<()> {
        self.check_closed()?;
        self.data.write().upsert(namespace, code, member, score);
        Ok(())
    }

    fn top(&self, namespace: &str, code: &str, limit: usize) -> Result<Vec<ScoredMember>> {
        self.check_closed()?;
        Ok(self.data.read().top(namespace, code, limit))
    }

    fn score(&self, namespace: &str, code: &str, member: &str) -> Result<Option<i64>> {
        self.check_closed()?;
        Ok(self.data.read().score(namespace, code, member))
    }

    fn bucket_len(&self, namespace: &str, code: &str) -> Result<usize> {
        self.check_closed()?;
        Ok(self.data.read().bucket_len(namespace, code))
    }

    fn codes(&self, namespace: &str) -> Result<Vec<String>> {
        self.check_closed()?;
        Ok(self.data.read().codes(namespace))
    }
}

impl IndexStore for MemoryStore {
    fn sync(&self) -> Result<()> {
        self.check_closed()
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn store_type(&self) -> &'static str {
        "memory"
    }
}
