use std::sync::Arc;

use argent::error::{ArgentError, Result};
use argent::index::{IndexDescriptor, Indexer, PhoneticSearcher};
use argent::record::FieldNames;
use argent::source::MemorySource;
use argent::store::{CursorStore, IndexStore, InvertedIndexStore, MemoryStore, ScoredMember};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

fn photo(id: &str, time: &str, caption: &str) -> Value {
    json!({"id": id, "created_time": time, "caption": caption})
}

fn create_indexer(
    source: MemorySource<Value>,
) -> Result<(Arc<MemoryStore>, Indexer<MemorySource<Value>>)> {
    let store = Arc::new(MemoryStore::new());
    let descriptor = IndexDescriptor::new("photos", "created_time", source);
    let indexer = Indexer::new(descriptor, store.clone())?;
    Ok((store, indexer))
}

#[test]
fn test_end_to_end_single_record() -> Result<()> {
    let source = MemorySource::with_records(
        "created_time",
        vec![photo("a", "2020-01-02", "Bright Sunset.jpg")],
    );
    let (store, indexer) = create_indexer(source)?;

    assert_eq!(
        indexer.word_filter().filter("Bright Sunset.jpg")?,
        vec!["Bright", "Sunset"]
    );
    assert!(indexer.run_pass(&FieldNames::new("id", "caption"))?);

    assert_eq!(
        store.top("photos", "PRT", 10)?,
        vec![ScoredMember::new("a", 1577923200)]
    );
    assert_eq!(
        store.top("photos", "SNST", 10)?,
        vec![ScoredMember::new("a", 1577923200)]
    );
    assert_eq!(store.codes("photos")?, vec!["PRT", "SNST"]);
    assert_eq!(store.get_cursor("photos")?, Some("2020-01-02".to_string()));
    Ok(())
}

#[test]
fn test_incremental_passes() -> Result<()> {
    let source = MemorySource::with_records(
        "created_time",
        vec![photo("a", "2020-01-02", "Harbour")],
    );
    let (store, indexer) = create_indexer(source)?;
    let accessor = FieldNames::new("id", "caption");

    assert!(indexer.run_pass(&accessor)?);
    assert!(!indexer.run_pass(&accessor)?);

    // New records arrive between passes.
    indexer
        .descriptor()
        .source()
        .push(photo("b", "2020-01-05", "Harbour lights"));
    indexer
        .descriptor()
        .source()
        .push(photo("c", "2020-01-04", "Harbor"));

    let report = indexer.run_pass_report(&accessor)?;
    assert_eq!(report.fetched, 2);
    assert_eq!(report.previous_cursor, "2020-01-02");
    assert_eq!(report.cursor, "2020-01-05");

    let members: Vec<String> = store
        .top("photos", "HRPR", 10)?
        .into_iter()
        .map(|m| m.member)
        .collect();
    assert_eq!(members, vec!["b", "c", "a"]);
    Ok(())
}

#[test]
fn test_missing_attribute_does_not_block_batch() -> Result<()> {
    let source = MemorySource::with_records(
        "created_time",
        vec![
            json!({"id": "x", "created_time": "2020-03-01"}),
            photo("y", "2020-02-01", "Lighthouse"),
            json!({"created_time": "2020-01-15", "caption": "Anchorage"}),
        ],
    );
    let (store, indexer) = create_indexer(source)?;

    let report = indexer.run_pass_report(&FieldNames::new("id", "caption"))?;
    assert_eq!(report.fetched, 3);
    assert_eq!(report.indexed, 1);
    assert_eq!(report.skipped, 2);

    assert_eq!(store.get_cursor("photos")?, Some("2020-03-01".to_string()));
    assert!(store.score("photos", "L0S", "y")?.is_some());
    Ok(())
}

#[test]
fn test_text_field_fallback() -> Result<()> {
    let source = MemorySource::with_records(
        "created_time",
        vec![json!({"id": "a", "created_time": "2020-01-02", "label": "Lighthouse"})],
    );
    let (store, indexer) = create_indexer(source)?;

    indexer.run_pass(&FieldNames::new("id", "caption").or_text_field("label"))?;
    assert!(store.score("photos", "L0S", "a")?.is_some());
    Ok(())
}

#[test]
fn test_reindex_with_newer_timestamp_updates_rank() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    store.upsert("photos", "PRT", "a", 100)?;
    store.upsert("photos", "PRT", "b", 200)?;

    store.upsert("photos", "PRT", "a", 300)?;
    store.upsert("photos", "PRT", "a", 300)?;

    assert_eq!(store.bucket_len("photos", "PRT")?, 2);
    assert_eq!(store.top("photos", "PRT", 1)?[0].member, "a");
    Ok(())
}

#[test]
fn test_source_contract_violation_keeps_cursor() -> Result<()> {
    let store: Arc<dyn IndexStore> = Arc::new(MemoryStore::new());
    store.set_cursor("photos", "2021-06-01")?;

    let stale = |_since: DateTime<Utc>| -> Result<Vec<Value>> {
        Ok(vec![photo("old", "2020-01-01", "Lighthouse")])
    };
    let indexer = Indexer::new(
        IndexDescriptor::new("photos", "created_time", stale),
        store.clone(),
    )?;

    assert!(indexer.run_pass(&FieldNames::new("id", "caption"))?);
    assert_eq!(store.get_cursor("photos")?, Some("2021-06-01".to_string()));
    Ok(())
}

#[test]
fn test_store_failure_aborts_pass() -> Result<()> {
    let source = MemorySource::with_records(
        "created_time",
        vec![photo("a", "2020-01-02", "Lighthouse")],
    );
    let (store, indexer) = create_indexer(source)?;
    store.close()?;

    let err = indexer.run_pass(&FieldNames::new("id", "caption")).unwrap_err();
    assert!(matches!(err, ArgentError::Storage(_)));
    Ok(())
}

#[test]
fn test_search_after_indexing() -> Result<()> {
    let source = MemorySource::with_records(
        "updated_at",
        vec![
            json!({"id": "1", "updated_at": "2020-01-01", "surname": "Schmidt"}),
            json!({"id": "2", "updated_at": "2020-01-03", "surname": "Smith"}),
            json!({"id": "3", "updated_at": "2020-01-02", "surname": "Jones"}),
        ],
    );
    let store = Arc::new(MemoryStore::new());
    let indexer = Indexer::new(IndexDescriptor::new("people", "updated_at", source), store.clone())?;
    indexer.run_pass(&FieldNames::new("id", "surname"))?;

    // Smith (SM0/XMT) and Schmidt (XMT/SMT) share XMT.
    let searcher = PhoneticSearcher::new("people", store)?;
    let ids: Vec<String> = searcher
        .search("Schmidt", 10)?
        .into_iter()
        .map(|hit| hit.id)
        .collect();
    assert_eq!(ids, vec!["2", "1"]);
    Ok(())
}
