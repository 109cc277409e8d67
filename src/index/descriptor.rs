//! Index descriptors.

use crate::source::RecordSource;

/// Immutable description of one index: where its keys live, which record
/// field holds the timestamp, and where new records come from.
#[derive(Clone, Debug)]
pub struct IndexDescriptor<S: RecordSource> {
    key: String,
    time_field: String,
    source: S,
}

impl<S: RecordSource> IndexDescriptor<S> {
    /// Create a descriptor for the namespace `key`.
    pub fn new<K: Into<String>, T: Into<String>>(key: K, time_field: T, source: S) -> Self {
        IndexDescriptor {
            key: key.into(),
            time_field: time_field.into(),
            source,
        }
    }

    /// Namespace of the cursor and buckets.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn time_field(&self) -> &str {
        &self.time_field
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
