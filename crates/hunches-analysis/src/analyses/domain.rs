//! Domain popularity vs score

use std::cmp::Ordering;

use crate::{
    aggregate::ScoreAggregate, config::AnalysisConfig, enrich::EnrichedStory, group::ScoreGroups,
};

use super::mean;

pub type DomainStats = ScoreAggregate<String>;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainReport {
    /// Every domain, in name order
    pub domains: Vec<DomainStats>,
    /// Domains with at least `min_domain_posts` stories, best average first
    pub popular: Vec<DomainStats>,
    /// Mean of the news domains' average scores
    pub news_avg_score: Option<f64>,
    /// Mean of the other popular domains' average scores
    pub other_avg_score: Option<f64>,
    /// Stories without a usable domain
    pub unassigned: usize,
    top_domains: usize,
}

impl DomainReport {
    #[must_use]
    pub fn compute(stories: &[EnrichedStory], config: &AnalysisConfig) -> Self {
        let groups = ScoreGroups::by_key(stories, |story| story.domain.clone(), |story| story.score());
        let domains = groups.aggregate(Clone::clone);

        let mut popular = domains
            .iter()
            .filter(|stats| stats.count >= config.min_domain_posts)
            .cloned()
            .collect::<Vec<_>>();
        popular.sort_by(by_avg_score_desc);

        let news_avg_score = mean(
            domains
                .iter()
                .filter(|stats| config.is_news_domain(&stats.key))
                .map(|stats| stats.mean),
        );
        let other_avg_score = mean(
            popular
                .iter()
                .filter(|stats| !config.is_news_domain(&stats.key))
                .map(|stats| stats.mean),
        );

        Self {
            domains,
            popular,
            news_avg_score,
            other_avg_score,
            unassigned: groups.unassigned(),
            top_domains: config.top_domains,
        }
    }

    /// The best popular domains, at most `top_domains` of them
    #[must_use]
    pub fn top(&self) -> &[DomainStats] {
        &self.popular[..self.popular.len().min(self.top_domains)]
    }

    /// `(post count, average score)` per domain
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.domains
            .iter()
            .map(|stats| (stats.count as f64, stats.mean))
            .collect()
    }
}

fn by_avg_score_desc(a: &DomainStats, b: &DomainStats) -> Ordering {
    b.mean.total_cmp(&a.mean).then_with(|| a.key.cmp(&b.key))
}
