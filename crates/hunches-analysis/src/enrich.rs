//! Enriched story projection
//!
//! [`Enricher`] runs every feature extractor over a batch and neutralizes the
//! per-record failures: a missing or malformed field leaves that feature
//! `None` (or 0 for karma), is logged, and is counted in
//! [`EnrichmentReport`]. Downstream grouping and correlation only ever see
//! clean values.

use crate::{
    feature::{self, FeatureError, TimeFields},
    karma::KarmaModel,
    record::StoryRecord,
};

/// A story plus its derived features
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedStory {
    pub record: StoryRecord,
    pub domain: Option<String>,
    pub title_length: Option<usize>,
    pub time: Option<TimeFields>,
    /// Estimated karma at post time; `None` unless karma estimation was requested
    pub karma: Option<f64>,
}

impl EnrichedStory {
    #[must_use]
    pub fn score(&self) -> f64 {
        self.record.score_value()
    }
}

/// Failure counts of one enrichment pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub records: usize,
    pub domain_failures: usize,
    pub title_failures: usize,
    pub time_failures: usize,
    /// Records whose karma defaulted to 0
    pub karma_failures: usize,
}

/// Applies the feature extractors to story records
#[derive(Debug, Clone, Copy, Default)]
pub struct Enricher {
    karma_model: Option<KarmaModel>,
}

impl Enricher {
    /// Enricher for domain, title length and time fields
    #[must_use]
    pub fn new() -> Self {
        Self { karma_model: None }
    }

    /// Also estimates karma at post time with `model`
    #[must_use]
    pub fn with_karma(model: KarmaModel) -> Self {
        Self {
            karma_model: Some(model),
        }
    }

    #[must_use]
    pub fn enrich(&self, record: StoryRecord, report: &mut EnrichmentReport) -> EnrichedStory {
        report.records += 1;

        let domain = feature::extract_domain(record.url.as_deref());
        let title_length = record
            .title
            .as_deref()
            .map(feature::title_length)
            .ok_or(FeatureError::Missing { field: "title" });
        let time = record
            .post_time
            .resolve("time")
            .map(TimeFields::from_instant);
        let karma = self.karma_model.map(|model| {
            model.estimate(&record).unwrap_or_else(|err| {
                report.karma_failures += 1;
                tracing::warn!(
                    author = record.author.as_deref().unwrap_or("<unknown>"),
                    error = %err,
                    "cannot estimate karma at post time, using 0"
                );
                0.0
            })
        });

        EnrichedStory {
            domain: neutralize(domain, &mut report.domain_failures),
            title_length: neutralize(title_length, &mut report.title_failures),
            time: neutralize(time, &mut report.time_failures),
            karma,
            record,
        }
    }

    /// Enriches a whole batch, keeping input order.
    #[must_use]
    pub fn enrich_batch(
        &self,
        records: Vec<StoryRecord>,
    ) -> (Vec<EnrichedStory>, EnrichmentReport) {
        let mut report = EnrichmentReport::default();
        let stories = records
            .into_iter()
            .map(|record| self.enrich(record, &mut report))
            .collect();
        tracing::debug!(?report, "enriched story batch");
        (stories, report)
    }
}

fn neutralize<T>(result: Result<T, FeatureError>, failures: &mut usize) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            *failures += 1;
            match &err {
                // absent urls and titles are routine (Ask HN, deleted items)
                FeatureError::Missing { .. } => tracing::trace!(error = %err, "feature missing"),
                FeatureError::Malformed { .. } => tracing::warn!(error = %err, "feature skipped"),
            }
            None
        }
    }
}
