//! Author activity vs score
//!
//! Works on authors, not stories: each author contributes one point
//! `(stories posted, average score)`. Post-count buckets summarize the
//! authors' average scores, and the last bucket is closed at the largest
//! observed post count.

use hunches_stats::{binning::BinningError, correlation};

use crate::{
    aggregate::ScoreAggregate, config::AnalysisConfig, enrich::EnrichedStory, group::ScoreGroups,
};

use super::{mean, unzip_pairs};

/// Activity summary of one author
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorActivity {
    pub author: String,
    pub post_count: usize,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorReport {
    /// Every author, most active first
    pub authors: Vec<AuthorActivity>,
    pub mean_post_count: Option<f64>,
    pub mean_avg_score: Option<f64>,
    /// Correlation of post count with average score across authors
    pub correlation: Option<f64>,
    pub buckets: Vec<ScoreAggregate<usize>>,
    /// Highest average scores among authors with enough stories
    pub top_authors: Vec<AuthorActivity>,
}

impl AuthorReport {
    #[expect(clippy::cast_precision_loss)]
    pub fn compute(
        stories: &[EnrichedStory],
        config: &AnalysisConfig,
    ) -> Result<Self, BinningError> {
        let authors = collect_activity(stories);
        let points = authors
            .iter()
            .map(|activity| (activity.post_count as f64, activity.avg_score))
            .collect::<Vec<_>>();
        let (counts, averages) = unzip_pairs(&points);

        let buckets = match authors.first() {
            Some(most_active) => {
                let boundaries = match config.author_post_boundaries(most_active.post_count as f64)
                {
                    Ok(boundaries) => Some(boundaries),
                    // every author posted at most once
                    Err(BinningError::TooFewBoundaries { .. }) => None,
                    Err(err) => return Err(err),
                };
                boundaries.map_or_else(Vec::new, |boundaries| {
                    ScoreGroups::by_boundaries(
                        &points,
                        &boundaries,
                        |(count, _)| Some(*count),
                        |(_, avg)| *avg,
                    )
                    .aggregate_intervals(&boundaries)
                })
            }
            None => vec![],
        };

        let mut top_authors = authors
            .iter()
            .filter(|activity| activity.post_count >= config.min_author_stories)
            .cloned()
            .collect::<Vec<_>>();
        top_authors.sort_by(|a, b| b.avg_score.total_cmp(&a.avg_score));
        top_authors.truncate(config.top_authors);

        Ok(Self {
            mean_post_count: mean(counts.iter().copied()),
            mean_avg_score: mean(averages.iter().copied()),
            correlation: correlation::pearson(&counts, &averages),
            buckets,
            top_authors,
            authors,
        })
    }

    /// `(post count, average score)` per author
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.authors
            .iter()
            .map(|activity| (activity.post_count as f64, activity.avg_score))
            .collect()
    }
}

/// Per-author activity, sorted by post count descending then name
fn collect_activity(stories: &[EnrichedStory]) -> Vec<AuthorActivity> {
    let groups = ScoreGroups::by_key(
        stories,
        |story| story.record.author.clone(),
        |story| story.score(),
    );
    let mut authors = groups
        .aggregate(Clone::clone)
        .into_iter()
        .map(|row| AuthorActivity {
            author: row.key,
            post_count: row.count,
            avg_score: row.mean,
        })
        .collect::<Vec<_>>();
    authors.sort_by(|a, b| {
        b.post_count
            .cmp(&a.post_count)
            .then_with(|| a.author.cmp(&b.author))
    });
    authors
}
