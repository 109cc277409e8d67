//! Score-ordered member set backing one phonetic bucket.
//!
//! Members are unique; each carries an integer score (unix seconds). Reads
//! walk the set from the highest score down, and members sharing a score
//! come out in descending member order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// A set of unique members ordered by score.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i64>", into = "BTreeMap<String, i64>")]
pub struct SortedSet {
    /// Current score of every member.
    scores: HashMap<String, i64>,
    /// `(score, member)` pairs, ascending.
    ordered: BTreeSet<(i64, String)>,
}

impl SortedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `member` with `score`, replacing the score of an existing
    /// member. Returns `true` if the member was not present before.
    pub fn insert(&mut self, member: &str, score: i64) -> bool {
        match self.scores.get_mut(member) {
            Some(current) if *current == score => false,
            Some(current) => {
                self.ordered.remove(&(*current, member.to_string()));
                *current = score;
                self.ordered.insert((score, member.to_string()));
                false
            }
            None => {
                self.scores.insert(member.to_string(), score);
                self.ordered.insert((score, member.to_string()));
                true
            }
        }
    }

    pub fn score(&self, member: &str) -> Option<i64> {
        self.scores.get(member).copied()
    }

    pub fn contains(&self, member: &str) -> bool {
        self.scores.contains_key(member)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Members from the highest score down.
    pub fn iter_desc(&self) -> impl Iterator<Item = (&str, i64)> {
        self.ordered
            .iter()
            .rev()
            .map(|(score, member)| (member.as_str(), *score))
    }

    /// The `limit` highest-scored members.
    pub fn top(&self, limit: usize) -> Vec<(String, i64)> {
        self.iter_desc()
            .take(limit)
            .map(|(member, score)| (member.to_string(), score))
            .collect()
    }
}

impl From<BTreeMap<String, i64>> for SortedSet {
    fn from(members: BTreeMap<String, i64>) -> Self {
        let mut set = SortedSet::new();
        for (member, score) in &members {
            set.insert(member, *score);
        }
        set
    }
}

impl From<SortedSet> for BTreeMap<String, i64> {
    fn from(set: SortedSet) -> Self {
        set.scores.into_iter().collect()
    }
}
