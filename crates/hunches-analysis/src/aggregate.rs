//! Per-bucket score summaries
//!
//! The reporting surface shared by every analysis: one
//! `(label, mean, median, count)` row per non-empty bucket.

use std::collections::BTreeMap;

use hunches_stats::{binning::Boundaries, descriptive::DescriptiveStats};

use crate::group::ScoreGroups;

/// Summary of the scores in one bucket
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreAggregate<K> {
    pub key: K,
    pub label: String,
    pub mean: f64,
    pub median: f64,
    pub count: usize,
}

/// Summarizes each non-empty bucket, in key order.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use hunches_analysis::aggregate::aggregate;
///
/// let buckets = BTreeMap::from([(2024, vec![1.0, 2.0, 3.0]), (2023, vec![])]);
/// let rows = aggregate(&buckets, |year| year.to_string());
/// assert_eq!(rows.len(), 1);
/// assert_eq!((rows[0].mean, rows[0].median, rows[0].count), (2.0, 2.0, 3));
/// ```
pub fn aggregate<K, L>(buckets: &BTreeMap<K, Vec<f64>>, mut label: L) -> Vec<ScoreAggregate<K>>
where
    K: Ord + Clone,
    L: FnMut(&K) -> String,
{
    buckets
        .iter()
        .filter_map(|(key, scores)| {
            let stats = DescriptiveStats::new(scores.iter().copied())?;
            Some(ScoreAggregate {
                key: key.clone(),
                label: label(key),
                mean: stats.mean,
                median: stats.median,
                count: stats.count,
            })
        })
        .collect()
}

impl<K> ScoreGroups<K>
where
    K: Ord + Clone,
{
    /// Summarizes every bucket, labeling keys with `label`.
    pub fn aggregate<L>(&self, label: L) -> Vec<ScoreAggregate<K>>
    where
        L: FnMut(&K) -> String,
    {
        aggregate(self.groups(), label)
    }
}

impl ScoreGroups<usize> {
    /// Summarizes numeric buckets, labeled by their interval.
    #[must_use]
    pub fn aggregate_intervals(&self, boundaries: &Boundaries) -> Vec<ScoreAggregate<usize>> {
        self.aggregate(|index| boundaries.label(*index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bucket() {
        let groups = ScoreGroups::by_key([1.0, 2.0, 3.0], |_| Some(()), |score| *score);
        let rows = groups.aggregate(|()| "all".to_owned());
        assert_eq!(
            rows,
            [ScoreAggregate {
                key: (),
                label: "all".to_owned(),
                mean: 2.0,
                median: 2.0,
                count: 3,
            }]
        );
    }

    #[test]
    fn test_counts_and_means_match_members() {
        let edges = Boundaries::new(vec![0.0, 25.0, 50.0, 75.0]).unwrap();
        let items = [(10.0, 4.0), (20.0, 8.0), (30.0, 1.0), (99.0, 100.0), (60.0, 5.0)];
        let groups =
            ScoreGroups::by_boundaries(items, &edges, |(value, _)| Some(*value), |(_, s)| *s);
        let rows = groups.aggregate_intervals(&edges);

        let labels = rows.iter().map(|r| r.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, ["[0, 25)", "[25, 50)", "[50, 75)"]);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].mean, 6.0);
        assert_eq!(rows[0].median, 6.0);
        assert_eq!(rows[1].count, 1);
        assert_eq!(rows[2].mean, 5.0);
        assert_eq!(
            rows.iter().map(|r| r.count).sum::<usize>() + groups.unassigned(),
            items.len()
        );
    }

    #[test]
    fn test_empty_buckets_are_omitted() {
        let edges = Boundaries::new(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let groups =
            ScoreGroups::by_boundaries([2.5, 0.5], &edges, |value| Some(*value), |_| 1.0);
        let rows = groups.aggregate_intervals(&edges);
        assert_eq!(rows.iter().map(|r| r.key).collect::<Vec<_>>(), [0, 2]);
    }
}
