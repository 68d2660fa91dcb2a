//! Secondary index from a lookup key to the set of titles it matches.

use std::collections::{BTreeMap, BTreeSet};

/// Maps a secondary key (keyword, member, creator, type) to item titles.
///
/// Buckets are sets, so a title appears at most once per key. Empty buckets
/// are dropped as soon as their last title is removed.
#[derive(Debug, Clone)]
pub struct SecondaryIndex<K: Ord> {
    buckets: BTreeMap<K, BTreeSet<String>>,
}

impl<K: Ord> Default for SecondaryIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> SecondaryIndex<K> {
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    /// Record `title` under `key`, creating the bucket if needed
    pub fn insert(&mut self, key: K, title: &str) {
        self.buckets.entry(key).or_default().insert(title.to_string());
    }

    /// Titles stored under `key`, if any
    pub fn get<Q>(&self, key: &Q) -> Option<&BTreeSet<String>>
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.buckets.get(key)
    }

    /// Remove `title` from every bucket.
    ///
    /// Scans all buckets since the index keeps no reverse mapping. Returns
    /// the number of buckets the title was removed from.
    pub fn purge(&mut self, title: &str) -> usize {
        let mut removed = 0;
        self.buckets.retain(|_, titles| {
            if titles.remove(title) {
                removed += 1;
            }
            !titles.is_empty()
        });
        removed
    }

    /// Iterate over keys in order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.keys()
    }

    /// Every title referenced by any bucket
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.buckets.values().flatten().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
