//! In-memory record source for tests and embedding.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::error::Result;
use crate::record::Record;
use crate::source::{RecordSource, select_newer};

/// A record source backed by a vector.
///
/// Records can be appended between passes, which makes it a convenient
/// stand-in for a table that keeps growing.
#[derive(Debug)]
pub struct MemorySource<R> {
    time_field: String,
    records: RwLock<Vec<R>>,
}

impl<R: Record + Clone> MemorySource<R> {
    /// Create an empty source ordering records by `time_field`.
    pub fn new<S: Into<String>>(time_field: S) -> Self {
        MemorySource {
            time_field: time_field.into(),
            records: RwLock::new(Vec::new()),
        }
    }

    /// Create a source holding `records`.
    pub fn with_records<S: Into<String>>(time_field: S, records: Vec<R>) -> Self {
        MemorySource {
            time_field: time_field.into(),
            records: RwLock::new(records),
        }
    }

    /// Append a record.
    pub fn push(&self, record: R) {
        self.records.write().push(record);
    }

    /// Number of records held, regardless of the cursor.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn time_field(&self) -> &str {
        &self.time_field
    }
}

impl<R: Record + Clone> RecordSource for MemorySource<R> {
    type Record = R;

    fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<R>> {
        let records = self.records.read();
        Ok(select_newer(records.iter().cloned(), &self.time_field, since))
    }
}
