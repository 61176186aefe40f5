//! The five score analyses
//!
//! Each analysis is a pure `compute` over an enriched batch that derives one
//! feature, buckets it, aggregates scores per bucket and correlates the
//! feature with score. Fetching, printing and plotting are left to the
//! caller.
//!
//! | analysis          | feature                          |
//! |-------------------|----------------------------------|
//! | [`title`]         | title length                     |
//! | [`author`]        | stories posted by the author     |
//! | [`domain`]        | domain of the story URL          |
//! | [`time`]          | year, hour and weekday of posting|
//! | [`karma`]         | author karma at post time        |

use hunches_stats::descriptive::DescriptiveStats;

pub mod author;
pub mod domain;
pub mod karma;
pub mod time;
pub mod title;

/// Arithmetic mean, `None` for an empty input
fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    DescriptiveStats::new(values).map(|stats| stats.mean)
}

/// Splits `(x, y)` pairs into the two series `pearson` expects
fn unzip_pairs(pairs: &[(f64, f64)]) -> (Vec<f64>, Vec<f64>) {
    pairs.iter().copied().unzip()
}
