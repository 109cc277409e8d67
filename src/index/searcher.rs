//! Phonetic lookups over an index.
//!
//! The searcher is the read side of the indexer: it encodes a query word
//! with the same encoder and word filter, reads the matching buckets from
//! the highest score down, and merges them into the most recent record ids.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use crate::analysis::WordFilter;
use crate::error::Result;
use crate::index::config::IndexerConfig;
use crate::phonetic::{DoubleMetaphone, PhoneticEncoder};
use crate::store::IndexStore;

/// A matching record id with its most recent score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub id: String,
    pub score: i64,
}

/// Reads phonetic buckets of one namespace.
pub struct PhoneticSearcher {
    namespace: String,
    store: Arc<dyn IndexStore>,
    encoder: Arc<dyn PhoneticEncoder>,
    word_filter: WordFilter,
}

impl PhoneticSearcher {
    /// Create a searcher with the default word filter and Double Metaphone.
    pub fn new<S: Into<String>>(namespace: S, store: Arc<dyn IndexStore>) -> Result<Self> {
        Self::with_config(namespace, store, &IndexerConfig::default())
    }

    /// Create a searcher sharing the word policy of an indexer configuration.
    pub fn with_config<S: Into<String>>(
        namespace: S,
        store: Arc<dyn IndexStore>,
        config: &IndexerConfig,
    ) -> Result<Self> {
        Ok(PhoneticSearcher {
            namespace: namespace.into(),
            store,
            encoder: Arc::new(DoubleMetaphone::new()),
            word_filter: WordFilter::with_config(config.word_filter.clone())?,
        })
    }

    /// Replace the phonetic encoder.
    pub fn with_encoder(mut self, encoder: Arc<dyn PhoneticEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The bucket codes a word is looked up under, primary first.
    pub fn word_codes(&self, word: &str) -> Vec<String> {
        self.encoder
            .encode(word)
            .keys()
            .map(str::to_string)
            .collect()
    }

    /// The distinct bucket codes of every index word of `text`, in order of
    /// first appearance.
    pub fn text_codes(&self, text: &str) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut codes = Vec::new();
        for word in self.word_filter.filter(text)? {
            for code in self.encoder.encode(&word).keys() {
                if seen.insert(code.to_string()) {
                    codes.push(code.to_string());
                }
            }
        }
        Ok(codes)
    }

    /// The `limit` most recent records sounding like `word`.
    ///
    /// Both codes of the word are looked up; a record found under both keeps
    /// its higher score.
    pub fn search(&self, word: &str, limit: usize) -> Result<Vec<Hit>> {
        self.search_codes(&self.word_codes(word), limit)
    }

    /// The `limit` most recent records of a single bucket.
    pub fn search_code(&self, code: &str, limit: usize) -> Result<Vec<Hit>> {
        self.merge(std::iter::once(code), limit)
    }

    /// Search every index word of `text` and merge the results.
    pub fn search_text(&self, text: &str, limit: usize) -> Result<Vec<Hit>> {
        self.search_codes(&self.text_codes(text)?, limit)
    }

    /// Merge the buckets of already computed codes.
    pub fn search_codes(&self, codes: &[String], limit: usize) -> Result<Vec<Hit>> {
        self.merge(codes.iter().map(String::as_str), limit)
    }

    /// Merge buckets by best score, then order like a single bucket would.
    ///
    /// Reading `limit` members per bucket is enough: a record missing from a
    /// bucket's head is outranked there by `limit` others.
    fn merge<'a>(&self, codes: impl Iterator<Item = &'a str>, limit: usize) -> Result<Vec<Hit>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut best: HashMap<String, i64> = HashMap::new();
        for code in codes {
            for entry in self.store.top(&self.namespace, code, limit)? {
                best.entry(entry.member)
                    .and_modify(|score| *score = (*score).max(entry.score))
                    .or_insert(entry.score);
            }
        }

        let mut hits: Vec<Hit> = best
            .into_iter()
            .map(|(id, score)| Hit { id, score })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| b.id.cmp(&a.id)));
        hits.truncate(limit);
        Ok(hits)
    }
}

impl std::fmt::Debug for PhoneticSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhoneticSearcher")
            .field("namespace", &self.namespace)
            .field("store", &self.store.store_type())
            .field("encoder", &self.encoder.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InvertedIndexStore, MemoryStore};

    fn searcher() -> (Arc<MemoryStore>, PhoneticSearcher) {
        let store = Arc::new(MemoryStore::new());
        let searcher = PhoneticSearcher::new("people", store.clone()).unwrap();
        (store, searcher)
    }

    fn ids(hits: &[Hit]) -> Vec<&str> {
        hits.iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn test_search_merges_primary_and_secondary() {
        let (store, searcher) = searcher();
        // "Schmidt" encodes to XMT / SMT; "Smith" to SM0 / XMT.
        store.upsert("people", "XMT", "old", 100).unwrap();
        store.upsert("people", "SMT", "new", 300).unwrap();
        store.upsert("people", "XMT", "mid", 200).unwrap();

        let hits = searcher.search("Schmidt", 10).unwrap();
        assert_eq!(ids(&hits), vec!["new", "mid", "old"]);
        assert_eq!(hits[0].score, 300);
    }

    #[test]
    fn test_duplicate_keeps_best_score() {
        let (store, searcher) = searcher();
        store.upsert("people", "XMT", "a", 100).unwrap();
        store.upsert("people", "SMT", "a", 500).unwrap();
        store.upsert("people", "SMT", "b", 300).unwrap();

        let hits = searcher.search("Schmidt", 10).unwrap();
        assert_eq!(
            hits,
            vec![
                Hit { id: "a".to_string(), score: 500 },
                Hit { id: "b".to_string(), score: 300 }
            ]
        );
    }

    #[test]
    fn test_limit_and_ties() {
        let (store, searcher) = searcher();
        store.upsert("people", "PRT", "a", 5).unwrap();
        store.upsert("people", "PRT", "c", 5).unwrap();
        store.upsert("people", "PRT", "b", 5).unwrap();

        assert_eq!(ids(&searcher.search_code("PRT", 2).unwrap()), vec!["c", "b"]);
        assert!(searcher.search_code("PRT", 0).unwrap().is_empty());
        assert!(searcher.search_code("NONE", 10).unwrap().is_empty());
    }

    #[test]
    fn test_search_text() {
        let (store, searcher) = searcher();
        store.upsert("people", "PRT", "a", 1).unwrap();
        store.upsert("people", "SNST", "b", 2).unwrap();

        let hits = searcher.search_text("the Bright Sunset.jpg", 10).unwrap();
        assert_eq!(ids(&hits), vec!["b", "a"]);
        assert!(searcher.search_text("", 10).unwrap().is_empty());
    }

    #[test]
    fn test_codes_match_search() {
        let (store, searcher) = searcher();
        store.upsert("people", "SMT", "a", 1).unwrap();
        store.upsert("people", "SNST", "b", 2).unwrap();

        assert_eq!(searcher.word_codes("Schmidt"), vec!["XMT", "SMT"]);
        assert!(searcher.word_codes("1234").is_empty());

        // Repeated words contribute their codes once, in first-seen order.
        let codes = searcher.text_codes("Sunset Schmidt sunset.png").unwrap();
        assert_eq!(codes, vec!["SNST", "XMT", "SMT"]);

        assert_eq!(
            searcher.search_codes(&codes, 10).unwrap(),
            searcher.search_text("Sunset Schmidt sunset.png", 10).unwrap()
        );
    }
}
