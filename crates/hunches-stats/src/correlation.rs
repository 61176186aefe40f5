//! Linear correlation between a feature and a target series
//!
//! - [`pearson`]: Pearson product-moment correlation of two numeric series
//! - [`pearson_with_min_samples`]: the same with a caller-chosen minimum sample size
//! - [`categorical_association`]: a single "how much does this category matter"
//!   score for a categorical feature
//!
//! A correlation is `None` ("undefined") when the sample is too small or when
//! either series has zero variance. Subsetting (e.g. a time window) is the
//! caller's job: pass the already filtered series.

use std::collections::BTreeSet;

/// Smallest sample size for which a correlation is defined at all
pub const MIN_SAMPLES: usize = 2;

/// Pearson correlation coefficient of two paired series.
///
/// Returns `None` for fewer than [`MIN_SAMPLES`] pairs or if either series
/// is constant. The result is clamped to `[-1, 1]`.
///
/// # Panics
///
/// Panics if `xs` and `ys` have different lengths.
///
/// # Examples
///
/// ```
/// use hunches_stats::correlation::pearson;
///
/// let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
///
/// // constant series
/// assert_eq!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]), None);
/// ```
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    pearson_with_min_samples(xs, ys, MIN_SAMPLES)
}

/// Pearson correlation requiring at least `min_samples` pairs.
///
/// `min_samples` below [`MIN_SAMPLES`] is raised to it.
///
/// # Panics
///
/// Panics if `xs` and `ys` have different lengths.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn pearson_with_min_samples(xs: &[f64], ys: &[f64], min_samples: usize) -> Option<f64> {
    assert_eq!(
        xs.len(),
        ys.len(),
        "correlated series must have equal lengths"
    );
    let n = xs.len();
    if n < min_samples.max(MIN_SAMPLES) {
        return None;
    }
    if is_constant(xs) || is_constant(ys) {
        return None;
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

fn is_constant(values: &[f64]) -> bool {
    values
        .split_first()
        .is_none_or(|(first, rest)| rest.iter().all(|v| v.total_cmp(first).is_eq()))
}

/// Mean absolute one-hot correlation of a categorical feature with `scores`.
///
/// Each distinct category becomes a 0/1 indicator series correlated against
/// `scores`; the absolute values are averaged. Categories whose indicator is
/// constant (present in every row) contribute nothing. The sign of each
/// association is discarded, so the result lies in `[0, 1]`.
///
/// Returns `None` when no category yields a defined correlation.
///
/// # Panics
///
/// Panics if `categories` and `scores` have different lengths.
///
/// # Examples
///
/// ```
/// use hunches_stats::correlation::categorical_association;
///
/// let hours = [0, 0, 1, 1];
/// let scores = [1.0, 1.0, 9.0, 9.0];
/// let r = categorical_association(&hours, &scores).unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn categorical_association<K>(categories: &[K], scores: &[f64]) -> Option<f64>
where
    K: Ord,
{
    assert_eq!(
        categories.len(),
        scores.len(),
        "correlated series must have equal lengths"
    );

    let distinct = categories.iter().collect::<BTreeSet<_>>();

    let mut indicator = vec![0.0; categories.len()];
    let mut sum = 0.0;
    let mut defined = 0_usize;
    for category in distinct {
        for (slot, value) in indicator.iter_mut().zip(categories) {
            *slot = if value == category { 1.0 } else { 0.0 };
        }
        if let Some(r) = pearson(&indicator, scores) {
            sum += r.abs();
            defined += 1;
        }
    }
    (defined > 0).then(|| sum / defined as f64)
}
