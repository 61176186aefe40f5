//! Temporal karma reconstruction
//!
//! The data set only carries each author's reputation at export time. This
//! module estimates the reputation an author had when a given story was
//! posted, assuming reputation grew linearly from 0 at account creation to its
//! current value at a fixed reference instant.
//!
//! ```text
//! karma
//!   ^                         * current_reputation
//!   |                    ,-'  |
//!   |               ,-'       |
//!   |          * estimate     |
//!   |     ,-'    |            |
//!   +--*---------+------------+---> time
//!   created    post       reference
//! ```
//!
//! Real reputation growth is not linear, so the estimate is a biased
//! approximation. The reference instant must be the same for every record in
//! a run; it is injected through [`KarmaModel`].

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    feature::{FeatureError, FeatureResult},
    record::StoryRecord,
};

/// 2024-10-01T00:00:00Z, when the data set was exported
pub const DEFAULT_REFERENCE_EPOCH: i64 = 1_727_740_800;

#[must_use]
pub fn default_reference_time() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::seconds(DEFAULT_REFERENCE_EPOCH)
}

/// Linearly interpolated reputation at `post_time`.
///
/// If the account is not older than the reference instant the estimate is
/// `current_reputation` unchanged. Posts before account creation clamp to 0.
/// Posts after the reference instant extrapolate past `current_reputation`.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use hunches_analysis::karma::interpolate_reputation;
///
/// let at = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let estimate = interpolate_reputation(at(500), at(0), at(1000), 100.0);
/// assert_eq!(estimate, 50.0);
/// ```
#[must_use]
pub fn interpolate_reputation(
    post_time: DateTime<Utc>,
    account_created_time: DateTime<Utc>,
    reference_time: DateTime<Utc>,
    current_reputation: f64,
) -> f64 {
    let total_span = span_seconds(account_created_time, reference_time);
    if total_span <= 0.0 {
        return current_reputation;
    }
    let post_span = span_seconds(account_created_time, post_time);
    let estimate = (post_span / total_span) * current_reputation;
    estimate.max(0.0)
}

#[expect(clippy::cast_precision_loss)]
fn span_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

/// Karma estimator bound to one reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KarmaModel {
    reference_time: DateTime<Utc>,
}

impl Default for KarmaModel {
    fn default() -> Self {
        Self::new(default_reference_time())
    }
}

impl KarmaModel {
    #[must_use]
    pub fn new(reference_time: DateTime<Utc>) -> Self {
        Self { reference_time }
    }

    #[must_use]
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    /// Estimates the author's karma when `record` was posted.
    ///
    /// Fails if the post time, account creation time or current karma is
    /// missing or unreadable.
    pub fn estimate(&self, record: &StoryRecord) -> FeatureResult<f64> {
        let post_time = record.post_time.resolve("time")?;
        let created = record.author_created.resolve("created")?;
        let karma = record
            .author_karma
            .ok_or(FeatureError::Missing { field: "karma" })?;
        if !karma.is_finite() {
            return Err(FeatureError::Malformed {
                field: "karma",
                value: karma.to_string(),
            });
        }
        Ok(interpolate_reputation(
            post_time,
            created,
            self.reference_time,
            karma,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::record::RawInstant;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn record(post: RawInstant, created: RawInstant, karma: Option<f64>) -> StoryRecord {
        StoryRecord {
            title: Some("title".to_owned()),
            url: None,
            score: 1,
            post_time: post,
            author: Some("alice".to_owned()),
            author_karma: karma,
            author_created: created,
        }
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(interpolate_reputation(at(500), at(0), at(1000), 100.0), 50.0);
    }

    #[test]
    fn test_degenerate_account_age() {
        assert_eq!(
            interpolate_reputation(at(500), at(1000), at(1000), 123.5),
            123.5
        );
        assert_eq!(
            interpolate_reputation(at(500), at(2000), at(1000), 42.0),
            42.0
        );
    }

    #[test]
    fn test_post_before_creation_clamps_to_zero() {
        assert_eq!(interpolate_reputation(at(-50), at(0), at(1000), 100.0), 0.0);
    }

    #[test]
    fn test_post_after_reference_extrapolates() {
        assert_eq!(
            interpolate_reputation(at(2000), at(0), at(1000), 100.0),
            200.0
        );
    }

    #[test]
    fn test_bounds_and_monotonicity() {
        let mut rng = Pcg32::seed_from_u64(2024);
        for _ in 0..500 {
            let created = rng.random_range(0..1_000_000_000_i64);
            let reference = created + rng.random_range(1..1_000_000_000_i64);
            let current = rng.random_range(0.0..200_000.0);
            let t1 = rng.random_range(created..=reference);
            let t2 = rng.random_range(t1..=reference);

            let k1 = interpolate_reputation(at(t1), at(created), at(reference), current);
            let k2 = interpolate_reputation(at(t2), at(created), at(reference), current);
            assert!((0.0..=current).contains(&k1), "{k1} not in [0, {current}]");
            assert!((0.0..=current).contains(&k2), "{k2} not in [0, {current}]");
            assert!(k1 <= k2, "{k1} > {k2} for {t1} < {t2}");
        }
    }

    #[test]
    fn test_default_reference_time() {
        assert_eq!(
            default_reference_time().to_rfc3339(),
            "2024-10-01T00:00:00+00:00"
        );
        assert_eq!(KarmaModel::default().reference_time(), default_reference_time());
    }

    #[test]
    fn test_model_estimate() {
        let model = KarmaModel::new(at(1000));
        let story = record(RawInstant::Epoch(250), RawInstant::Epoch(0), Some(400.0));
        assert_eq!(model.estimate(&story), Ok(100.0));
    }

    #[test]
    fn test_model_failures() {
        let model = KarmaModel::new(at(1000));

        let no_karma = record(RawInstant::Epoch(250), RawInstant::Epoch(0), None);
        assert_eq!(
            model.estimate(&no_karma),
            Err(FeatureError::Missing { field: "karma" })
        );

        let bad_time = record(
            RawInstant::Text("soon".to_owned()),
            RawInstant::Epoch(0),
            Some(10.0),
        );
        assert!(matches!(
            model.estimate(&bad_time),
            Err(FeatureError::Malformed { field: "time", .. })
        ));

        let no_created = record(RawInstant::Epoch(250), RawInstant::Missing, Some(10.0));
        assert_eq!(
            model.estimate(&no_created),
            Err(FeatureError::Missing { field: "created" })
        );

        let infinite = record(
            RawInstant::Epoch(250),
            RawInstant::Epoch(0),
            Some(f64::INFINITY),
        );
        assert!(model.estimate(&infinite).is_err());
    }
}
