//! Grouping of scores by bucket
//!
//! [`ScoreGroups`] partitions a batch into buckets keyed by an ordered key and
//! remembers how many items fell into no bucket. Every item is counted exactly
//! once, so `assigned() + unassigned() == total()` always holds.
//!
//! The key type decides the reporting order: bucket indices and years sort
//! numerically, weekday indices follow their explicit label list.

use std::collections::BTreeMap;

use hunches_stats::binning::{BucketAssignment, Boundaries};

/// Scores grouped by bucket key
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreGroups<K> {
    groups: BTreeMap<K, Vec<f64>>,
    unassigned: usize,
}

impl<K> Default for ScoreGroups<K> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
            unassigned: 0,
        }
    }
}

impl<K> ScoreGroups<K>
where
    K: Ord,
{
    /// Groups `items` by the key `key` returns; `None` counts as unassigned.
    pub fn by_key<I, T, F, S>(items: I, mut key: F, mut score: S) -> Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> Option<K>,
        S: FnMut(&T) -> f64,
    {
        let mut groups = Self::default();
        for item in items {
            groups.insert(key(&item), score(&item));
        }
        groups
    }

    /// Adds one score to bucket `key`, or to the unassigned count.
    pub fn insert(&mut self, key: Option<K>, score: f64) {
        match key {
            Some(key) => self.groups.entry(key).or_default().push(score),
            None => self.unassigned += 1,
        }
    }

    /// Non-empty buckets in key order
    #[must_use]
    pub fn groups(&self) -> &BTreeMap<K, Vec<f64>> {
        &self.groups
    }

    /// Number of scores in bucket `key`
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        self.groups.get(key).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn assigned(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn unassigned(&self) -> usize {
        self.unassigned
    }

    /// Number of grouped items, assigned or not
    #[must_use]
    pub fn total(&self) -> usize {
        self.assigned() + self.unassigned
    }
}

impl ScoreGroups<usize> {
    /// Groups `items` into the numeric buckets of `boundaries`.
    ///
    /// Items whose feature is `None` or outside every bucket are unassigned.
    pub fn by_boundaries<I, T, F, S>(
        items: I,
        boundaries: &Boundaries,
        mut feature: F,
        score: S,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> Option<f64>,
        S: FnMut(&T) -> f64,
    {
        Self::by_key(
            items,
            |item| {
                feature(item)
                    .map(|value| boundaries.bucket_of(value))
                    .and_then(BucketAssignment::index)
            },
            score,
        )
    }
}
