//! The incremental indexing pass.
//!
//! A pass reads the namespace cursor, pulls the records newer than it from
//! the source, moves the cursor to the newest of them, and then writes every
//! phonetic code of every word of every record into the store.
//!
//! The cursor moves before any record is processed, so a record that cannot
//! be indexed (no id, no text, unreadable timestamp) is skipped for good
//! rather than retried on every following pass.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use argent::index::{IndexDescriptor, Indexer};
//! use argent::record::FieldNames;
//! use argent::source::MemorySource;
//! use argent::store::{InvertedIndexStore, MemoryStore};
//!
//! let record: HashMap<String, String> = [
//!     ("id", "a"),
//!     ("created_time", "2020-01-02"),
//!     ("caption", "Bright Sunset.jpg"),
//! ]
//! .into_iter()
//! .map(|(k, v)| (k.to_string(), v.to_string()))
//! .collect();
//!
//! let source = MemorySource::with_records("created_time", vec![record]);
//! let store = Arc::new(MemoryStore::new());
//! let indexer = Indexer::new(IndexDescriptor::new("photos", "created_time", source), store.clone()).unwrap();
//!
//! assert!(indexer.run_pass(&FieldNames::new("id", "caption")).unwrap());
//! assert_eq!(store.score("photos", "PRT", "a").unwrap(), Some(1577923200));
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::WordFilter;
use crate::error::{ArgentError, Result};
use crate::index::config::IndexerConfig;
use crate::index::descriptor::IndexDescriptor;
use crate::phonetic::{DoubleMetaphone, PhoneticEncoder};
use crate::record::{FieldAccessor, Record};
use crate::source::RecordSource;
use crate::store::IndexStore;
use crate::timestamp::parse_timestamp;

/// Outcome of one indexing pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Namespace the pass ran on.
    pub key: String,

    /// Records returned by the source.
    pub fetched: usize,

    /// Records whose codes were written.
    pub indexed: usize,

    /// Records skipped for a missing attribute or unreadable timestamp.
    pub skipped: usize,

    /// Bucket upserts performed.
    pub entries_written: usize,

    /// Cursor before the pass.
    pub previous_cursor: String,

    /// Cursor after the pass.
    pub cursor: String,

    /// Whether the source returned any record.
    pub updated: bool,
}

/// Runs indexing passes for one index.
pub struct Indexer<S: RecordSource> {
    descriptor: IndexDescriptor<S>,
    store: Arc<dyn IndexStore>,
    encoder: Arc<dyn PhoneticEncoder>,
    word_filter: WordFilter,
    default_cursor: String,
}

impl<S: RecordSource> Indexer<S> {
    /// Create an indexer with the default word filter and Double Metaphone.
    pub fn new(descriptor: IndexDescriptor<S>, store: Arc<dyn IndexStore>) -> Result<Self> {
        Self::with_config(descriptor, store, &IndexerConfig::default())
    }

    /// Create an indexer from a configuration.
    pub fn with_config(
        descriptor: IndexDescriptor<S>,
        store: Arc<dyn IndexStore>,
        config: &IndexerConfig,
    ) -> Result<Self> {
        parse_timestamp(&config.default_cursor).map_err(|_| {
            ArgentError::config(format!(
                "Default cursor {:?} is not a timestamp",
                config.default_cursor
            ))
        })?;

        Ok(Indexer {
            descriptor,
            store,
            encoder: Arc::new(DoubleMetaphone::new()),
            word_filter: WordFilter::with_config(config.word_filter.clone())?,
            default_cursor: config.default_cursor.clone(),
        })
    }

    /// Replace the phonetic encoder.
    pub fn with_encoder(mut self, encoder: Arc<dyn PhoneticEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn descriptor(&self) -> &IndexDescriptor<S> {
        &self.descriptor
    }

    pub fn key(&self) -> &str {
        self.descriptor.key()
    }

    pub fn store(&self) -> &Arc<dyn IndexStore> {
        &self.store
    }

    pub fn encoder(&self) -> &Arc<dyn PhoneticEncoder> {
        &self.encoder
    }

    pub fn word_filter(&self) -> &WordFilter {
        &self.word_filter
    }

    /// The stored cursor, or the default when the namespace has none.
    pub fn cursor(&self) -> Result<String> {
        Ok(self
            .store
            .get_cursor(self.key())?
            .unwrap_or_else(|| self.default_cursor.clone()))
    }

    /// Run one pass and report what it did.
    ///
    /// Record-level problems are logged and counted in
    /// [`PassReport::skipped`]; source and store failures abort the pass.
    pub fn run_pass_report<A>(&self, accessor: &A) -> Result<PassReport>
    where
        A: FieldAccessor<S::Record> + ?Sized,
    {
        let key = self.key();
        let previous_cursor = self.cursor()?;
        let since = parse_timestamp(&previous_cursor).map_err(|_| {
            ArgentError::storage(format!(
                "Stored cursor for {key} is not a timestamp: {previous_cursor:?}"
            ))
        })?;

        log::info!("Indexing {key} since {previous_cursor:?}");
        let records = self.descriptor.source().fetch_since(since)?;

        let mut report = PassReport {
            key: key.to_string(),
            fetched: records.len(),
            previous_cursor: previous_cursor.clone(),
            cursor: previous_cursor,
            ..PassReport::default()
        };

        if records.is_empty() {
            log::info!("No new records for {key}");
            return Ok(report);
        }
        report.updated = true;

        if let Some(cursor) = self.advance_cursor(&records, since)? {
            report.cursor = cursor;
        }

        for record in &records {
            match self.index_record(record, accessor) {
                Ok(written) => {
                    report.indexed += 1;
                    report.entries_written += written;
                }
                Err(e) if e.is_record_error() => {
                    log::warn!("Skipping record in {key}: {e}");
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        self.store.sync()?;

        log::info!(
            "Indexed {key}: {} of {} records, {} entries, cursor {:?}",
            report.indexed,
            report.fetched,
            report.entries_written,
            report.cursor
        );
        Ok(report)
    }

    /// Run one pass. Returns `false` when the source had nothing new.
    pub fn run_pass<A>(&self, accessor: &A) -> Result<bool>
    where
        A: FieldAccessor<S::Record> + ?Sized,
    {
        Ok(self.run_pass_report(accessor)?.updated)
    }

    /// Alias of [`Indexer::run_pass`].
    pub fn find_and_update<A>(&self, accessor: &A) -> Result<bool>
    where
        A: FieldAccessor<S::Record> + ?Sized,
    {
        self.run_pass(accessor)
    }

    /// Move the cursor to the newest parseable timestamp of the batch.
    ///
    /// Returns the new cursor, or `None` when it stays where it was.
    fn advance_cursor(
        &self,
        records: &[S::Record],
        since: DateTime<Utc>,
    ) -> Result<Option<String>> {
        let time_field = self.descriptor.time_field();
        let mut newest: Option<(DateTime<Utc>, String)> = None;

        for record in records {
            let Some(raw) = record.field(time_field) else {
                continue;
            };
            let Ok(time) = parse_timestamp(&raw) else {
                continue;
            };
            if newest.as_ref().is_none_or(|(best, _)| time > *best) {
                newest = Some((time, raw));
            }
        }

        let Some((time, raw)) = newest else {
            log::warn!(
                "No record in the {} batch has a readable {time_field}; cursor unchanged",
                self.key()
            );
            return Ok(None);
        };

        if time < since {
            log::warn!(
                "Newest record of {} ({raw:?}) is older than the cursor; cursor unchanged",
                self.key()
            );
            return Ok(None);
        }

        self.store.set_cursor(self.key(), &raw)?;
        Ok(Some(raw))
    }

    /// Write the codes of one record. Returns the number of upserts.
    fn index_record<A>(&self, record: &S::Record, accessor: &A) -> Result<usize>
    where
        A: FieldAccessor<S::Record> + ?Sized,
    {
        let fields = accessor.access(record)?;

        let time_field = self.descriptor.time_field();
        let raw_time = record.field(time_field).ok_or_else(|| {
            ArgentError::missing_attribute(Some(fields.id.clone()), time_field)
        })?;
        let score = parse_timestamp(&raw_time)?.timestamp();

        let mut written = 0;
        for word in self.word_filter.filter(&fields.text)? {
            let codes = self.encoder.encode(&word);
            for code in codes.keys() {
                self.store.upsert(self.key(), code, &fields.id, score)?;
                written += 1;
            }
        }

        log::debug!(
            "Indexed {} in {} with score {score} ({written} entries)",
            fields.id,
            self.key()
        );
        Ok(written)
    }
}

impl<S: RecordSource + std::fmt::Debug> std::fmt::Debug for Indexer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indexer")
            .field("descriptor", &self.descriptor)
            .field("store", &self.store.store_type())
            .field("encoder", &self.encoder.name())
            .field("default_cursor", &self.default_cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetic::PhoneticCodes;
    use crate::record::FieldNames;
    use crate::source::MemorySource;
    use crate::store::{CursorStore, InvertedIndexStore, MemoryStore};
    use serde_json::{Value, json};

    fn photos(records: Vec<Value>) -> (Arc<MemoryStore>, Indexer<MemorySource<Value>>) {
        let store = Arc::new(MemoryStore::new());
        let source = MemorySource::with_records("created_time", records);
        let descriptor = IndexDescriptor::new("photos", "created_time", source);
        let indexer = Indexer::new(descriptor, store.clone()).unwrap();
        (store, indexer)
    }

    fn accessor() -> FieldNames {
        FieldNames::new("id", "caption")
    }

    #[test]
    fn test_single_record_pass() {
        let (store, indexer) = photos(vec![json!({
            "id": "a",
            "created_time": "2020-01-02",
            "caption": "Bright Sunset.jpg"
        })]);

        let report = indexer.run_pass_report(&accessor()).unwrap();
        assert!(report.updated);
        assert_eq!(report.fetched, 1);
        assert_eq!(report.indexed, 1);
        assert_eq!(report.entries_written, 2);
        assert_eq!(report.previous_cursor, "Jan. 1, 1970");
        assert_eq!(report.cursor, "2020-01-02");

        assert_eq!(store.score("photos", "PRT", "a").unwrap(), Some(1577923200));
        assert_eq!(store.score("photos", "SNST", "a").unwrap(), Some(1577923200));
        assert_eq!(store.codes("photos").unwrap(), vec!["PRT", "SNST"]);
        assert_eq!(
            store.get_cursor("photos").unwrap(),
            Some("2020-01-02".to_string())
        );
    }

    #[test]
    fn test_empty_batch_leaves_cursor() {
        let (store, indexer) = photos(vec![]);
        assert!(!indexer.run_pass(&accessor()).unwrap());
        assert_eq!(store.get_cursor("photos").unwrap(), None);
        assert_eq!(indexer.cursor().unwrap(), "Jan. 1, 1970");
    }

    #[test]
    fn test_second_pass_sees_nothing_new() {
        let (_store, indexer) = photos(vec![json!({
            "id": "a",
            "created_time": "2020-01-02",
            "caption": "Lighthouse"
        })]);

        assert!(indexer.run_pass(&accessor()).unwrap());
        assert!(!indexer.find_and_update(&accessor()).unwrap());
    }

    #[test]
    fn test_missing_attribute_skips_record() {
        let (store, indexer) = photos(vec![
            json!({"id": "a", "created_time": "2020-01-03"}),
            json!({"id": "b", "created_time": "2020-01-02", "caption": "Harbour"}),
        ]);

        let report = indexer.run_pass_report(&accessor()).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.indexed, 1);
        assert_eq!(report.cursor, "2020-01-03");
        assert!(store.score("photos", "HRPR", "b").unwrap().is_some());
    }

    #[test]
    fn test_unparseable_timestamp_skips_record() {
        let store = Arc::new(MemoryStore::new());
        let source = |_since: DateTime<Utc>| -> Result<Vec<Value>> {
            Ok(vec![
                json!({"id": "a", "created_time": "2020-01-05", "caption": "Lighthouse"}),
                json!({"id": "b", "created_time": "someday", "caption": "Harbour"}),
            ])
        };
        let descriptor = IndexDescriptor::new("photos", "created_time", source);
        let indexer = Indexer::new(descriptor, store.clone()).unwrap();

        let report = indexer.run_pass_report(&accessor()).unwrap();
        assert_eq!(report.indexed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.bucket_len("photos", "HRPR").unwrap(), 0);
    }

    #[test]
    fn test_cursor_never_moves_backwards() {
        let store = Arc::new(MemoryStore::new());
        store.set_cursor("photos", "2021-01-01").unwrap();

        // A misbehaving source that ignores the cursor.
        let source = |_since: DateTime<Utc>| -> Result<Vec<Value>> {
            Ok(vec![json!({
                "id": "a",
                "created_time": "2020-01-02",
                "caption": "Lighthouse"
            })])
        };
        let descriptor = IndexDescriptor::new("photos", "created_time", source);
        let indexer = Indexer::new(descriptor, store.clone()).unwrap();

        let report = indexer.run_pass_report(&accessor()).unwrap();
        assert!(report.updated);
        assert_eq!(report.cursor, "2021-01-01");
        assert_eq!(
            store.get_cursor("photos").unwrap(),
            Some("2021-01-01".to_string())
        );
    }

    #[test]
    fn test_source_failure_is_fatal() {
        let store = Arc::new(MemoryStore::new());
        let source = |_since: DateTime<Utc>| -> Result<Vec<Value>> {
            Err(ArgentError::source("connection refused"))
        };
        let indexer =
            Indexer::new(IndexDescriptor::new("photos", "created_time", source), store.clone())
                .unwrap();

        let err = indexer.run_pass(&accessor()).unwrap_err();
        assert!(matches!(err, ArgentError::Source(_)));
        assert_eq!(store.get_cursor("photos").unwrap(), None);
    }

    #[test]
    fn test_closure_accessor() {
        let (store, indexer) = photos(vec![json!({
            "id": 7,
            "created_time": "2020-01-02",
            "title": "Lighthouse"
        })]);

        let accessor = |record: &Value| -> Option<(String, String)> {
            Some((
                record.get("id")?.to_string(),
                record.get("title")?.as_str()?.to_string(),
            ))
        };
        assert!(indexer.run_pass(&accessor).unwrap());
        assert!(store.score("photos", "LTS", "7").unwrap().is_some());
    }

    #[derive(Debug)]
    struct FixedEncoder;

    impl PhoneticEncoder for FixedEncoder {
        fn encode(&self, _word: &str) -> PhoneticCodes {
            PhoneticCodes::new("X", Some("Y".to_string()))
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_custom_encoder() {
        let (store, indexer) = photos(vec![json!({
            "id": "a",
            "created_time": "2020-01-02",
            "caption": "Lighthouse"
        })]);
        let indexer = indexer.with_encoder(Arc::new(FixedEncoder));

        indexer.run_pass(&accessor()).unwrap();
        assert_eq!(store.codes("photos").unwrap(), vec!["X", "Y"]);
    }

    #[test]
    fn test_invalid_default_cursor() {
        let store = Arc::new(MemoryStore::new());
        let source = MemorySource::<Value>::new("created_time");
        let config = IndexerConfig {
            default_cursor: "the beginning".to_string(),
            ..IndexerConfig::default()
        };
        let err = Indexer::with_config(
            IndexDescriptor::new("photos", "created_time", source),
            store,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, ArgentError::Config(_)));
    }
}
