use crate::predicate::condition::Condition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value held under one key of a predicate object. The distinction between
/// an opaque operator leaf and a nested predicate is structural so that
/// merging never traverses into operator values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entry {
    Condition(Condition),
    Nested(Predicate),
}

/// One conjunction of per-field constraints: field or relation name mapped
/// to an operator value or to the related record's own predicate. Each key
/// holds exactly one entry; repeated constraints on a field must be combined
/// into a `Condition::And` before insertion, never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Predicate(BTreeMap<String, Entry>);

impl Predicate {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) {
        self.0.insert(key.into(), entry);
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.0.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Entry)> for Predicate {
    fn from_iter<I: IntoIterator<Item = (K, Entry)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, entry)| (key.into(), entry))
                .collect(),
        )
    }
}

impl IntoIterator for Predicate {
    type Item = (String, Entry);
    type IntoIter = std::collections::btree_map::IntoIter<String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
