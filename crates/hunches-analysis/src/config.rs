//! Analysis configuration
//!
//! Every constant the analyses depend on lives in [`AnalysisConfig`] so that
//! callers and tests can override it. [`AnalysisConfig::default`] holds the
//! standard values.

use chrono::{DateTime, Utc};
use hunches_stats::binning::{Boundaries, BinningError};

use crate::karma::{self, KarmaModel};

/// Mainstream news outlets compared against every other domain
pub const DEFAULT_NEWS_DOMAINS: &[&str] = &[
    "nytimes.com",
    "cnn.com",
    "bbc.co.uk",
    "theguardian.com",
    "washingtonpost.com",
    "reuters.com",
    "bloomberg.com",
];

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Instant at which current karma values were observed
    pub reference_time: DateTime<Utc>,
    pub news_domains: Vec<String>,
    pub title_length_edges: Vec<f64>,
    pub karma_edges: Vec<f64>,
    /// Fixed post-count edges; the largest observed count is appended as a
    /// closed final edge
    pub author_post_edges: Vec<f64>,
    pub min_domain_posts: usize,
    pub top_domains: usize,
    pub top_authors: usize,
    pub min_author_stories: usize,
    /// Minimum stories in a year for its karma correlation to be reported
    pub yearly_min_samples: usize,
    /// Years before the latest one that still count as recent
    pub recent_years: i32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reference_time: karma::default_reference_time(),
            news_domains: DEFAULT_NEWS_DOMAINS
                .iter()
                .map(|domain| (*domain).to_owned())
                .collect(),
            title_length_edges: vec![0.0, 25.0, 50.0, 75.0, 100.0, 125.0, 150.0, 200.0],
            karma_edges: vec![
                0.0,
                100.0,
                500.0,
                1000.0,
                5000.0,
                10_000.0,
                50_000.0,
                f64::INFINITY,
            ],
            author_post_edges: vec![1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 500.0, 1000.0],
            min_domain_posts: 10,
            top_domains: 20,
            top_authors: 10,
            min_author_stories: 5,
            yearly_min_samples: 6,
            recent_years: 2,
        }
    }
}

impl AnalysisConfig {
    #[must_use]
    pub fn karma_model(&self) -> KarmaModel {
        KarmaModel::new(self.reference_time)
    }

    pub fn title_length_boundaries(&self) -> Result<Boundaries, BinningError> {
        Boundaries::new(self.title_length_edges.clone())
    }

    pub fn karma_boundaries(&self) -> Result<Boundaries, BinningError> {
        Boundaries::new(self.karma_edges.clone())
    }

    /// Post-count boundaries closed at `max_post_count`.
    ///
    /// Configured edges at or above the maximum are dropped so the edges stay
    /// strictly increasing; the maximum itself always lands in the last
    /// bucket.
    pub fn author_post_boundaries(&self, max_post_count: f64) -> Result<Boundaries, BinningError> {
        let mut edges = self
            .author_post_edges
            .iter()
            .copied()
            .filter(|edge| *edge < max_post_count)
            .collect::<Vec<_>>();
        edges.push(max_post_count);
        Ok(Boundaries::new(edges)?.with_closed_upper())
    }

    #[must_use]
    pub fn is_news_domain(&self, domain: &str) -> bool {
        self.news_domains.iter().any(|news| news == domain)
    }
}
