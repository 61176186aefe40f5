//! Fixed-boundary binning for data analysis
//!
//! This module partitions numeric values into ordered, labeled intervals
//! defined by an explicit list of edges, and maps category indices to
//! explicitly supplied display names.
//!
//! # Interval Semantics
//!
//! Edges `[e0, e1, ..., en]` define the buckets `[e0, e1)`, `[e1, e2)`, ...,
//! `[e(n-1), en)`. Values below `e0`, at or above `en`, and NaN are
//! [`BucketAssignment::Unassigned`].
//!
//! When the last edge is derived from the data's own maximum, that maximum must
//! still land in the final bucket. [`Boundaries::with_closed_upper`] closes the
//! final bucket to `[e(n-1), en]` for that case.
//!
//! # Examples
//!
//! ```
//! use hunches_stats::binning::{BucketAssignment, Boundaries};
//!
//! let edges = Boundaries::new(vec![0.0, 10.0, 100.0]).unwrap();
//! assert_eq!(edges.bucket_of(10.0), BucketAssignment::Bucket(1));
//! assert_eq!(edges.bucket_of(100.0), BucketAssignment::Unassigned);
//! assert_eq!(edges.label(1), "[10, 100)");
//!
//! let closed = edges.with_closed_upper();
//! assert_eq!(closed.bucket_of(100.0), BucketAssignment::Bucket(1));
//! assert_eq!(closed.label(1), "[10, 100]");
//! ```

use std::{cmp::Ordering, fmt};

/// Configuration errors for bucket boundaries
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BinningError {
    #[display("at least 2 boundaries are required, got {count}")]
    TooFewBoundaries { count: usize },
    #[display("boundaries must be strictly increasing (position {index}: {value})")]
    NotIncreasing { index: usize, value: f64 },
}

/// Result of assigning one value to a set of buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketAssignment {
    /// Index of the interval containing the value
    Bucket(usize),
    /// Value is NaN or outside every configured interval
    Unassigned,
}

impl BucketAssignment {
    /// Returns the bucket index, if any
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            BucketAssignment::Bucket(index) => Some(index),
            BucketAssignment::Unassigned => None,
        }
    }
}

/// Ordered, strictly increasing bucket edges
#[derive(Debug, Clone, PartialEq)]
pub struct Boundaries {
    edges: Vec<f64>,
    closed_upper: bool,
}

impl Boundaries {
    /// Validates and stores bucket edges.
    ///
    /// The last edge may be `f64::INFINITY` for an open-ended final bucket.
    ///
    /// # Errors
    ///
    /// * [`BinningError::TooFewBoundaries`] - fewer than 2 edges
    /// * [`BinningError::NotIncreasing`] - an edge is NaN or not greater than its predecessor
    pub fn new(edges: Vec<f64>) -> Result<Self, BinningError> {
        if edges.len() < 2 {
            return Err(BinningError::TooFewBoundaries { count: edges.len() });
        }
        for (index, pair) in edges.windows(2).enumerate() {
            // NaN on either side compares as `None`
            if pair[0].partial_cmp(&pair[1]) != Some(Ordering::Less) {
                return Err(BinningError::NotIncreasing {
                    index: index + 1,
                    value: pair[1],
                });
            }
        }
        Ok(Self {
            edges,
            closed_upper: false,
        })
    }

    /// Returns a copy whose final bucket includes its upper edge.
    #[must_use]
    pub fn with_closed_upper(mut self) -> Self {
        self.closed_upper = true;
        self
    }

    /// Bucket edges in ascending order
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of buckets (one less than the number of edges)
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    /// Always `false`; a valid set of boundaries has at least one bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Finds the bucket containing `value`.
    #[must_use]
    pub fn bucket_of(&self, value: f64) -> BucketAssignment {
        let first = self.edges[0];
        let last = self.edges[self.edges.len() - 1];
        if value.is_nan() || value < first {
            return BucketAssignment::Unassigned;
        }
        if value >= last {
            return if self.closed_upper && value <= last {
                BucketAssignment::Bucket(self.len() - 1)
            } else {
                BucketAssignment::Unassigned
            };
        }
        // Number of edges <= value, minus one, is the interval index
        let upper = self.edges.partition_point(|edge| *edge <= value);
        BucketAssignment::Bucket(upper - 1)
    }

    /// Display label of the bucket at `index`, e.g. `[10, 100)`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        assert!(index < self.len(), "bucket index {index} out of range");
        let close = if self.closed_upper && index == self.len() - 1 {
            ']'
        } else {
            ')'
        };
        format!(
            "[{}, {}{close}",
            EdgeDisplay(self.edges[index]),
            EdgeDisplay(self.edges[index + 1])
        )
    }

    /// Display labels of all buckets in ascending order
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        (0..self.len()).map(|index| self.label(index)).collect()
    }
}

struct EdgeDisplay(f64);

impl fmt::Display for EdgeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_infinite() {
            let sign = if value < 0.0 { "-" } else { "" };
            write!(f, "{sign}inf")
        } else if value.fract().abs() < f64::EPSILON && value.abs() < 1e15 {
            write!(f, "{value:.0}")
        } else {
            write!(f, "{value}")
        }
    }
}

/// Assigns each value to a bucket of `boundaries`.
///
/// The output has the same length and order as the input.
///
/// # Examples
///
/// ```
/// use hunches_stats::binning::{assign_buckets, BucketAssignment::*, Boundaries};
///
/// let edges = Boundaries::new(vec![0.0, 10.0, 100.0]).unwrap();
/// let buckets = assign_buckets([-1.0, 0.0, 9.5, 10.0, 250.0], &edges);
/// assert_eq!(buckets, [Unassigned, Bucket(0), Bucket(0), Bucket(1), Unassigned]);
/// ```
pub fn assign_buckets<I>(values: I, boundaries: &Boundaries) -> Vec<BucketAssignment>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .map(|value| boundaries.bucket_of(value))
        .collect()
}

/// Explicit display names for categorical buckets
///
/// Category `i` is labeled `names[i]`. The order of the list is the
/// reporting order, so it never depends on the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalLabels {
    names: &'static [&'static str],
}

/// Weekday names with the Monday=0 convention
pub const WEEKDAYS: CategoricalLabels = CategoricalLabels::new(&[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
]);

impl CategoricalLabels {
    #[must_use]
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// Name of category `index`, or `None` if out of range
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&'static str> {
        self.names.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_too_few_boundaries() {
        assert_eq!(
            Boundaries::new(vec![1.0]),
            Err(BinningError::TooFewBoundaries { count: 1 })
        );
        assert!(Boundaries::new(vec![]).is_err());
    }

    #[test]
    fn test_not_increasing() {
        assert_eq!(
            Boundaries::new(vec![0.0, 10.0, 10.0]),
            Err(BinningError::NotIncreasing {
                index: 2,
                value: 10.0
            })
        );
        assert!(Boundaries::new(vec![0.0, f64::NAN]).is_err());
        assert_eq!(
            Boundaries::new(vec![f64::NAN, 1.0]).map_err(|e| e.to_string()),
            Err("boundaries must be strictly increasing (position 1: 1)".to_owned())
        );
    }

    #[test]
    fn test_half_open_intervals() {
        let edges = Boundaries::new(vec![0.0, 10.0, 100.0]).unwrap();
        assert_eq!(edges.bucket_of(0.0), BucketAssignment::Bucket(0));
        assert_eq!(edges.bucket_of(9.999), BucketAssignment::Bucket(0));
        assert_eq!(edges.bucket_of(10.0), BucketAssignment::Bucket(1));
        assert_eq!(edges.bucket_of(100.0), BucketAssignment::Unassigned);
        assert_eq!(edges.bucket_of(-0.5), BucketAssignment::Unassigned);
        assert_eq!(edges.bucket_of(f64::NAN), BucketAssignment::Unassigned);
    }

    #[test]
    fn test_closed_upper_includes_maximum() {
        let edges = Boundaries::new(vec![0.0, 10.0, 100.0])
            .unwrap()
            .with_closed_upper();
        assert_eq!(edges.bucket_of(100.0), BucketAssignment::Bucket(1));
        assert_eq!(edges.bucket_of(100.5), BucketAssignment::Unassigned);
        assert_eq!(edges.labels(), ["[0, 10)", "[10, 100]"]);
    }

    #[test]
    fn test_infinite_last_edge() {
        let edges = Boundaries::new(vec![0.0, 100.0, f64::INFINITY]).unwrap();
        assert_eq!(edges.bucket_of(1e12), BucketAssignment::Bucket(1));
        assert_eq!(edges.label(1), "[100, inf)");
    }

    #[test]
    fn test_fractional_label() {
        let edges = Boundaries::new(vec![0.5, 2.25]).unwrap();
        assert_eq!(edges.label(0), "[0.5, 2.25)");
    }

    #[test]
    fn test_bucket_coverage() {
        let edges = Boundaries::new(vec![0.0, 25.0, 50.0, 75.0, 100.0]).unwrap();
        let mut rng = Pcg32::seed_from_u64(42);
        let values = (0..1000)
            .map(|_| rng.random_range(-50.0..150.0))
            .collect::<Vec<f64>>();
        let assignments = assign_buckets(values.iter().copied(), &edges);

        let mut counts = vec![0; edges.len()];
        let mut unassigned = 0;
        for (value, assignment) in values.iter().zip(&assignments) {
            match assignment {
                BucketAssignment::Bucket(index) => {
                    assert!(edges.edges()[*index] <= *value);
                    assert!(*value < edges.edges()[*index + 1]);
                    counts[*index] += 1;
                }
                BucketAssignment::Unassigned => {
                    assert!(*value < 0.0 || *value >= 100.0);
                    unassigned += 1;
                }
            }
        }
        assert_eq!(counts.iter().sum::<usize>() + unassigned, values.len());
    }

    #[test]
    fn test_weekday_labels() {
        assert_eq!(WEEKDAYS.len(), 7);
        assert_eq!(WEEKDAYS.label(0), Some("Monday"));
        assert_eq!(WEEKDAYS.label(6), Some("Sunday"));
        assert_eq!(WEEKDAYS.label(7), None);
    }
}
