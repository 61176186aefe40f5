//! Author karma at post time vs score
//!
//! Needs stories enriched with a [`KarmaModel`](crate::karma::KarmaModel);
//! stories without a karma estimate are ignored. Stories whose estimate
//! failed carry karma 0 and are included, as they are in every table.

use std::collections::BTreeMap;

use hunches_stats::{binning::BinningError, correlation};

use crate::{
    aggregate::ScoreAggregate, config::AnalysisConfig, enrich::EnrichedStory, group::ScoreGroups,
};

use super::{mean, unzip_pairs};

/// Karma/score correlation of the stories posted in one year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyCorrelation {
    pub year: i32,
    pub stories: usize,
    pub correlation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KarmaReport {
    /// `(estimated karma, score)` per story
    pub points: Vec<(f64, f64)>,
    pub mean_score: Option<f64>,
    pub mean_karma: Option<f64>,
    pub correlation: Option<f64>,
    pub buckets: Vec<ScoreAggregate<usize>>,
    pub unassigned: usize,
    /// Years with enough stories and a defined correlation, in order
    pub yearly: Vec<YearlyCorrelation>,
}

impl KarmaReport {
    pub fn compute(
        stories: &[EnrichedStory],
        config: &AnalysisConfig,
    ) -> Result<Self, BinningError> {
        let boundaries = config.karma_boundaries()?;
        let estimated = stories
            .iter()
            .filter_map(|story| Some((story, story.karma?)))
            .collect::<Vec<_>>();
        let points = estimated
            .iter()
            .map(|(story, karma)| (*karma, story.score()))
            .collect::<Vec<_>>();
        let (karma, scores) = unzip_pairs(&points);

        let groups =
            ScoreGroups::by_boundaries(&points, &boundaries, |(k, _)| Some(*k), |(_, s)| *s);

        let mut by_year = BTreeMap::<i32, (Vec<f64>, Vec<f64>)>::new();
        for (story, karma) in &estimated {
            if let Some(time) = story.time {
                let (xs, ys) = by_year.entry(time.year).or_default();
                xs.push(*karma);
                ys.push(story.score());
            }
        }
        let yearly = by_year
            .into_iter()
            .filter_map(|(year, (xs, ys))| {
                let correlation =
                    correlation::pearson_with_min_samples(&xs, &ys, config.yearly_min_samples)?;
                Some(YearlyCorrelation {
                    year,
                    stories: xs.len(),
                    correlation,
                })
            })
            .collect();

        Ok(Self {
            mean_score: mean(scores.iter().copied()),
            mean_karma: mean(karma.iter().copied()),
            correlation: correlation::pearson(&karma, &scores),
            buckets: groups.aggregate_intervals(&boundaries),
            unassigned: groups.unassigned(),
            yearly,
            points,
        })
    }
}
