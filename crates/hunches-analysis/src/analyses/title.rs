//! Title length vs score

use hunches_stats::{binning::BinningError, correlation};

use crate::{
    aggregate::ScoreAggregate, config::AnalysisConfig, enrich::EnrichedStory, group::ScoreGroups,
};

use super::{mean, unzip_pairs};

#[derive(Debug, Clone, PartialEq)]
pub struct TitleReport {
    /// `(title length, score)` of every story with a title
    pub points: Vec<(f64, f64)>,
    pub mean_title_length: Option<f64>,
    pub mean_score: Option<f64>,
    pub correlation: Option<f64>,
    pub buckets: Vec<ScoreAggregate<usize>>,
    /// Stories whose length is outside every bucket
    pub unassigned: usize,
}

impl TitleReport {
    #[expect(clippy::cast_precision_loss)]
    pub fn compute(
        stories: &[EnrichedStory],
        config: &AnalysisConfig,
    ) -> Result<Self, BinningError> {
        let boundaries = config.title_length_boundaries()?;
        let points = stories
            .iter()
            .filter_map(|story| Some((story.title_length? as f64, story.score())))
            .collect::<Vec<_>>();

        let (lengths, scores) = unzip_pairs(&points);
        let groups =
            ScoreGroups::by_boundaries(&points, &boundaries, |(x, _)| Some(*x), |(_, y)| *y);

        Ok(Self {
            mean_title_length: mean(lengths.iter().copied()),
            mean_score: mean(scores.iter().copied()),
            correlation: correlation::pearson(&lengths, &scores),
            buckets: groups.aggregate_intervals(&boundaries),
            unassigned: groups.unassigned(),
            points,
        })
    }

    #[must_use]
    pub fn stories(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{enrich::Enricher, record::RawInstant, record::StoryRecord};

    fn titled(title: Option<&str>, score: i64) -> StoryRecord {
        StoryRecord {
            title: title.map(str::to_owned),
            url: None,
            score,
            post_time: RawInstant::Epoch(0),
            author: None,
            author_karma: None,
            author_created: RawInstant::Missing,
        }
    }

    #[test]
    fn test_title_report() {
        let long = "x".repeat(30);
        let huge = "y".repeat(250);
        let (stories, _) = Enricher::new().enrich_batch(vec![
            titled(Some("short"), 2),
            titled(Some("tiny"), 4),
            titled(Some(&long), 12),
            titled(Some(&huge), 100),
            titled(None, 1000),
        ]);
        let report = TitleReport::compute(&stories, &AnalysisConfig::default()).unwrap();

        assert_eq!(report.stories(), 4);
        assert_eq!(report.mean_score, Some(29.5));
        assert!(report.correlation.unwrap() > 0.9);

        let rows = report
            .buckets
            .iter()
            .map(|r| (r.label.as_str(), r.mean, r.count))
            .collect::<Vec<_>>();
        assert_eq!(rows, [("[0, 25)", 3.0, 2), ("[25, 50)", 12.0, 1)]);
        assert_eq!(report.unassigned, 1);
    }

    #[test]
    fn test_empty_batch() {
        let report = TitleReport::compute(&[], &AnalysisConfig::default()).unwrap();
        assert_eq!(report.stories(), 0);
        assert_eq!(report.mean_score, None);
        assert_eq!(report.correlation, None);
        assert!(report.buckets.is_empty());
    }
}
