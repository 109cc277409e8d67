//! The data shared by every store backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::sorted_set::SortedSet;
use crate::store::traits::{ScoredMember, bucket_key, cursor_key};

/// Snapshot format version written by the file store.
pub const KEYSPACE_VERSION: u32 = 1;

/// Cursors and buckets, addressed by their full keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpace {
    pub version: u32,
    pub cursors: BTreeMap<String, String>,
    pub buckets: BTreeMap<String, SortedSet>,
}

impl Default for KeySpace {
    fn default() -> Self {
        KeySpace {
            version: KEYSPACE_VERSION,
            cursors: BTreeMap::new(),
            buckets: BTreeMap::new(),
        }
    }
}

impl KeySpace {
    pub fn get_cursor(&self, namespace: &str) -> Option<String> {
        self.cursors.get(&cursor_key(namespace)).cloned()
    }

    pub fn set_cursor(&mut self, namespace: &str, value: &str) {
        self.cursors
            .insert(cursor_key(namespace), value.to_string());
    }

    pub fn upsert(&mut self, namespace: &str, code: &str, member: &str, score: i64) {
        self.buckets
            .entry(bucket_key(namespace, code))
            .or_default()
            .insert(member, score);
    }

    pub fn top(&self, namespace: &str, code: &str, limit: usize) -> Vec<ScoredMember> {
        self.buckets
            .get(&bucket_key(namespace, code))
            .map(|set| {
                set.iter_desc()
                    .take(limit)
                    .map(|(member, score)| ScoredMember::new(member, score))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn score(&self, namespace: &str, code: &str, member: &str) -> Option<i64> {
        self.buckets
            .get(&bucket_key(namespace, code))
            .and_then(|set| set.score(member))
    }

    pub fn bucket_len(&self, namespace: &str, code: &str) -> usize {
        self.buckets
            .get(&bucket_key(namespace, code))
            .map_or(0, SortedSet::len)
    }

    /// Codes of `namespace`. A namespace "a" does not see the buckets of
    /// namespace "a:b", since codes never contain a colon.
    pub fn codes(&self, namespace: &str) -> Vec<String> {
        let prefix = format!("{namespace}:");
        self.buckets
            .range(prefix.clone()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(&prefix))
            .filter_map(|key| {
                let code = &key[prefix.len()..];
                (!code.contains(':')).then(|| code.to_string())
            })
            .collect()
    }
}
