//! Posting time vs score
//!
//! Calendar fields are taken in UTC. Besides the per-year, per-hour and
//! per-weekday tables, the batch is split at `latest_year - recent_years` and
//! each side gets its own set of correlations, showing whether the effects
//! drift over time.

use chrono::{DateTime, Utc};
use hunches_stats::{binning::WEEKDAYS, correlation};

use crate::{
    aggregate::ScoreAggregate, config::AnalysisConfig, enrich::EnrichedStory, feature::TimeFields,
    group::ScoreGroups,
};

/// Correlations over one time window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowCorrelations {
    pub stories: usize,
    pub title_length: Option<f64>,
    /// Mean absolute one-hot correlation of the posting hour
    pub hour: Option<f64>,
    /// Mean absolute one-hot correlation of the weekday
    pub day_of_week: Option<f64>,
}

impl WindowCorrelations {
    #[expect(clippy::cast_precision_loss)]
    fn compute<'a, I>(stories: I) -> Self
    where
        I: IntoIterator<Item = (&'a EnrichedStory, TimeFields)>,
    {
        let mut count = 0;
        let mut lengths = vec![];
        let mut length_scores = vec![];
        let mut hours = vec![];
        let mut weekdays = vec![];
        let mut scores = vec![];
        for (story, time) in stories {
            count += 1;
            if let Some(length) = story.title_length {
                lengths.push(length as f64);
                length_scores.push(story.score());
            }
            hours.push(time.hour);
            weekdays.push(time.day_of_week);
            scores.push(story.score());
        }
        Self {
            stories: count,
            title_length: correlation::pearson(&lengths, &length_scores),
            hour: correlation::categorical_association(&hours, &scores),
            day_of_week: correlation::categorical_association(&weekdays, &scores),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeReport {
    pub first_post: Option<DateTime<Utc>>,
    pub last_post: Option<DateTime<Utc>>,
    pub yearly: Vec<ScoreAggregate<i32>>,
    pub hourly: Vec<ScoreAggregate<u32>>,
    /// Monday first
    pub weekday: Vec<ScoreAggregate<u32>>,
    /// First year of the recent window, `None` for an undated batch
    pub recent_from: Option<i32>,
    pub recent: WindowCorrelations,
    pub older: WindowCorrelations,
    /// Stories without a usable posting time
    pub unassigned: usize,
}

impl TimeReport {
    #[must_use]
    pub fn compute(stories: &[EnrichedStory], config: &AnalysisConfig) -> Self {
        let dated = stories
            .iter()
            .filter_map(|story| Some((story, story.time?)))
            .collect::<Vec<_>>();

        let instants = dated
            .iter()
            .filter_map(|(story, _)| story.record.post_time.resolve("time").ok())
            .collect::<Vec<_>>();

        let yearly = ScoreGroups::by_key(&dated, |(_, time)| Some(time.year), |(s, _)| s.score())
            .aggregate(ToString::to_string);
        let hourly = ScoreGroups::by_key(&dated, |(_, time)| Some(time.hour), |(s, _)| s.score())
            .aggregate(|hour| format!("{hour:02}"));
        let weekday = ScoreGroups::by_key(
            &dated,
            |(_, time)| Some(time.day_of_week),
            |(s, _)| s.score(),
        )
        .aggregate(|day| weekday_label(*day));

        let recent_from = dated
            .iter()
            .map(|(_, time)| time.year)
            .max()
            .map(|latest| latest - config.recent_years);
        let is_recent = |time: &TimeFields| recent_from.is_some_and(|from| time.year >= from);
        let recent = WindowCorrelations::compute(
            dated.iter().copied().filter(|(_, time)| is_recent(time)),
        );
        let older = WindowCorrelations::compute(
            dated.iter().copied().filter(|(_, time)| !is_recent(time)),
        );

        Self {
            first_post: instants.iter().min().copied(),
            last_post: instants.iter().max().copied(),
            yearly,
            hourly,
            weekday,
            recent_from,
            recent,
            older,
            unassigned: stories.len() - dated.len(),
        }
    }
}

fn weekday_label(day: u32) -> String {
    usize::try_from(day)
        .ok()
        .and_then(|index| WEEKDAYS.label(index))
        .map_or_else(|| day.to_string(), str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{enrich::Enricher, record::RawInstant, record::StoryRecord};

    const HOUR: i64 = 3600;
    const DAY: i64 = 24 * HOUR;
    // 2024-01-01T00:00:00Z, a Monday
    const NEW_YEAR_2024: i64 = 1_704_067_200;
    // 2020-01-01T00:00:00Z, a Wednesday
    const NEW_YEAR_2020: i64 = 1_577_836_800;

    fn posted(at: i64, score: i64) -> StoryRecord {
        posted_raw(RawInstant::Epoch(at), score)
    }

    fn posted_raw(post_time: RawInstant, score: i64) -> StoryRecord {
        StoryRecord {
            title: Some("x".repeat(usize::try_from(score).unwrap())),
            url: None,
            score,
            post_time,
            author: None,
            author_karma: None,
            author_created: RawInstant::Missing,
        }
    }

    fn report(records: Vec<StoryRecord>) -> TimeReport {
        let (stories, _) = Enricher::new().enrich_batch(records);
        TimeReport::compute(&stories, &AnalysisConfig::default())
    }

    #[test]
    fn test_calendar_tables() {
        let report = report(vec![
            posted(NEW_YEAR_2024 + 9 * HOUR, 10),
            posted(NEW_YEAR_2024 + DAY + 9 * HOUR, 20),
            posted(NEW_YEAR_2024 + DAY + 15 * HOUR, 30),
            posted(NEW_YEAR_2020, 1),
            posted_raw(RawInstant::Text("never".to_owned()), 3),
        ]);

        let yearly = report
            .yearly
            .iter()
            .map(|r| (r.label.as_str(), r.mean, r.count))
            .collect::<Vec<_>>();
        assert_eq!(yearly, [("2020", 1.0, 1), ("2024", 20.0, 3)]);

        let hourly = report
            .hourly
            .iter()
            .map(|r| (r.label.as_str(), r.count))
            .collect::<Vec<_>>();
        assert_eq!(hourly, [("00", 1), ("09", 2), ("15", 1)]);

        let weekday = report
            .weekday
            .iter()
            .map(|r| (r.label.as_str(), r.mean))
            .collect::<Vec<_>>();
        assert_eq!(
            weekday,
            [("Monday", 10.0), ("Tuesday", 25.0), ("Wednesday", 1.0)]
        );

        assert_eq!(
            report.first_post,
            DateTime::from_timestamp(NEW_YEAR_2020, 0)
        );
        assert_eq!(
            report.last_post,
            DateTime::from_timestamp(NEW_YEAR_2024 + DAY + 15 * HOUR, 0)
        );
        assert_eq!(report.unassigned, 1);
    }

    #[test]
    fn test_recent_and_older_windows() {
        let mut records = (0..4)
            .map(|i| posted(NEW_YEAR_2024 + i * HOUR, 10 + i))
            .collect::<Vec<_>>();
        records.extend((0..3).map(|i| posted(NEW_YEAR_2020 + i * DAY, 5 + i)));
        let report = report(records);

        assert_eq!(report.recent_from, Some(2022));
        assert_eq!(report.recent.stories, 4);
        assert_eq!(report.older.stories, 3);

        // title length equals score
        assert!((report.recent.title_length.unwrap() - 1.0).abs() < 1e-12);
        // one story per hour
        assert!(report.recent.hour.is_some());
        // all recent stories share a weekday
        assert_eq!(report.recent.day_of_week, None);
        assert!(report.older.day_of_week.is_some());
    }

    #[test]
    fn test_undated_batch() {
        let report = report(vec![posted_raw(RawInstant::Missing, 1)]);
        assert!(report.yearly.is_empty());
        assert_eq!(report.recent_from, None);
        assert_eq!(report.recent.stories, 0);
        assert_eq!(report.older.stories, 0);
        assert_eq!(report.first_post, None);
        assert_eq!(report.unassigned, 1);
    }
}
