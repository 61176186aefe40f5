//! Story features and score analyses for Hacker News data
//!
//! This crate turns raw story rows into enriched records and runs the score
//! analyses over them. It never talks to a database or draws anything: rows
//! come in, reports come out.
//!
//! # Overview
//!
//! Every analysis follows the same pipeline:
//!
//! 1. **Decode Rows** ([`record::StoryRecord`]): Decode the positional rows
//!    returned by the data source
//! 2. **Derive Features** ([`enrich::Enricher`]): Extract domain, title length,
//!    calendar fields and, on request, karma at post time
//!    ([`karma::KarmaModel`])
//! 3. **Group Scores** ([`group::ScoreGroups`]): Bucket stories by a feature,
//!    tracking stories that fall into no bucket
//! 4. **Aggregate** ([`aggregate::ScoreAggregate`]): Summarize each bucket as
//!    `(label, mean, median, count)`
//! 5. **Correlate** ([`hunches_stats::correlation`]): Measure the linear
//!    association between the feature and score
//!
//! [`analyses`] contains the five instances of this pipeline. All constants
//! they use are collected in [`config::AnalysisConfig`].
//!
//! # Error handling
//!
//! A bad field fails only the feature that needs it. [`enrich::Enricher`]
//! logs each failure and records it in an [`enrich::EnrichmentReport`]; the
//! feature is left empty (karma defaults to 0), so grouping and correlation
//! never see an error.
//!
//! # Examples
//!
//! ## Estimating karma at post time
//!
//! ```
//! use chrono::DateTime;
//! use hunches_analysis::karma::interpolate_reputation;
//!
//! let at = |secs| DateTime::from_timestamp(secs, 0).unwrap();
//! // account created at 0, 100 karma at 1000, post at 500
//! assert_eq!(interpolate_reputation(at(500), at(0), at(1000), 100.0), 50.0);
//! ```
//!
//! ## Running an analysis
//!
//! ```
//! use hunches_analysis::{
//!     analyses::title::TitleReport,
//!     config::AnalysisConfig,
//!     enrich::Enricher,
//!     record::{Cell, StoryRecord},
//! };
//!
//! let row = vec![
//!     Cell::Text("Show HN: A tiny database".to_owned()),
//!     Cell::Text("https://www.example.com/db".to_owned()),
//!     Cell::Integer(42),
//!     Cell::Integer(1_700_000_000),
//!     Cell::Text("alice".to_owned()),
//!     Cell::Null,
//!     Cell::Null,
//! ];
//! let record = StoryRecord::from_row(&row).unwrap();
//! let (stories, report) = Enricher::new().enrich_batch(vec![record]);
//! assert_eq!(stories[0].domain.as_deref(), Some("example.com"));
//! assert_eq!(report.records, 1);
//!
//! let title = TitleReport::compute(&stories, &AnalysisConfig::default()).unwrap();
//! assert_eq!(title.buckets[0].label, "[0, 25)");
//! assert_eq!(title.buckets[0].mean, 42.0);
//! ```

pub mod aggregate;
pub mod analyses;
pub mod config;
pub mod enrich;
pub mod feature;
pub mod group;
pub mod karma;
pub mod record;
