//! Record sources.
//!
//! A [`RecordSource`] is the query collaborator of an index: given the
//! cursor, it returns every record newer than it, most recent first. Where the
//! records come from (a database query, an HTTP API, a file feed) is the
//! source's business; the indexer only relies on that ordering contract.
//!
//! Closures `Fn(DateTime<Utc>) -> Result<Vec<R>>` are sources, so a query can
//! be supplied inline the same way an ORM call would be:
//!
//! ```
//! use argent::error::Result;
//! use argent::source::RecordSource;
//! use chrono::{DateTime, Utc};
//! use serde_json::{json, Value};
//!
//! let source = |_since: DateTime<Utc>| -> Result<Vec<Value>> {
//!     Ok(vec![json!({"id": "a", "time": "2020-01-02", "text": "Bright Sunset.jpg"})])
//! };
//! assert_eq!(source.fetch_since(DateTime::<Utc>::UNIX_EPOCH).unwrap().len(), 1);
//! ```

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlSource;
pub use memory::MemorySource;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::record::Record;
use crate::timestamp::parse_timestamp;

/// The query collaborator of an index.
pub trait RecordSource {
    /// Record type produced by this source.
    type Record: Record;

    /// Fetch records whose time field is strictly newer than `since`,
    /// sorted descending by that field.
    fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<Self::Record>>;
}

impl<R, F> RecordSource for F
where
    R: Record,
    F: Fn(DateTime<Utc>) -> Result<Vec<R>>,
{
    type Record = R;

    fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<R>> {
        self(since)
    }
}

/// Keep the records newer than `since` and order them most recent first.
///
/// Records whose time field is absent or unparseable are dropped, the way a
/// `time > ?` predicate drops NULLs.
pub(crate) fn select_newer<R: Record>(
    records: impl IntoIterator<Item = R>,
    time_field: &str,
    since: DateTime<Utc>,
) -> Vec<R> {
    let mut selected: Vec<(DateTime<Utc>, R)> = records
        .into_iter()
        .filter_map(|record| {
            let time = parse_timestamp(&record.field(time_field)?).ok()?;
            (time > since).then_some((time, record))
        })
        .collect();

    // Stable, so records sharing a timestamp keep their feed order.
    selected.sort_by(|a, b| b.0.cmp(&a.0));
    selected.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::epoch;
    use serde_json::{Value, json};

    #[test]
    fn test_select_newer_orders_descending() {
        let records = vec![
            json!({"id": "old", "time": "2020-01-01"}),
            json!({"id": "new", "time": "2020-03-01"}),
            json!({"id": "mid", "time": "Feb. 1, 2020"}),
        ];

        let selected = select_newer(records, "time", epoch());
        let ids: Vec<_> = selected.iter().map(|r| r.field("id").unwrap()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_select_newer_is_strict() {
        let records = vec![
            json!({"id": "same", "time": "2020-01-01"}),
            json!({"id": "after", "time": "2020-01-01 00:00:01"}),
        ];

        let since = parse_timestamp("2020-01-01").unwrap();
        let selected = select_newer(records, "time", since);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].field("id").as_deref(), Some("after"));
    }

    #[test]
    fn test_select_newer_drops_untimed_records() {
        let records: Vec<Value> = vec![
            json!({"id": "none"}),
            json!({"id": "bad", "time": "someday"}),
            json!({"id": "ok", "time": "2020-01-01"}),
        ];

        let selected = select_newer(records, "time", epoch());
        assert_eq!(selected.len(), 1);
    }
}
