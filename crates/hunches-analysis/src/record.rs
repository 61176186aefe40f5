//! Story records as delivered by the data source
//!
//! The ingestion collaborator returns positionally typed rows ([`Row`] of
//! [`Cell`]s). [`StoryRecord::from_row`] decodes the fixed story layout:
//!
//! ```text
//! 0 title    text, nullable
//! 1 url      text, nullable
//! 2 score    integer
//! 3 time     epoch seconds or timestamp text
//! 4 by       text, nullable
//! 5 karma    number, nullable
//! 6 created  epoch seconds or timestamp text, nullable
//! ```
//!
//! Timestamps are kept raw ([`RawInstant`]) so that a malformed value fails
//! only the feature that needs it, not the whole record.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::feature::{FeatureError, FeatureResult};

/// One typed value of a result row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

/// One result row, typed per position
pub type Row = Vec<Cell>;

/// Number of columns in a story row
pub const STORY_COLUMNS: usize = 7;

/// A timestamp exactly as the data source delivered it
#[derive(Debug, Clone, PartialEq)]
pub enum RawInstant {
    Missing,
    /// Seconds since the Unix epoch
    Epoch(i64),
    /// Fractional seconds since the Unix epoch
    EpochReal(f64),
    /// Timestamp text (RFC 3339, `YYYY-MM-DD HH:MM:SS` or numeric)
    Text(String),
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

impl RawInstant {
    /// Resolves the timestamp to an instant in UTC.
    ///
    /// Text without an offset is interpreted as UTC.
    pub fn resolve(&self, field: &'static str) -> FeatureResult<DateTime<Utc>> {
        let malformed = || FeatureError::Malformed {
            field,
            value: self.to_string(),
        };
        match self {
            RawInstant::Missing => Err(FeatureError::Missing { field }),
            RawInstant::Epoch(secs) => DateTime::from_timestamp(*secs, 0).ok_or_else(malformed),
            RawInstant::EpochReal(secs) => from_fractional_epoch(*secs).ok_or_else(malformed),
            RawInstant::Text(text) => parse_instant_text(text.trim()).ok_or_else(malformed),
        }
    }
}

impl std::fmt::Display for RawInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawInstant::Missing => f.write_str("<missing>"),
            RawInstant::Epoch(secs) => write!(f, "{secs}"),
            RawInstant::EpochReal(secs) => write!(f, "{secs}"),
            RawInstant::Text(text) => f.write_str(text),
        }
    }
}

impl From<&Cell> for RawInstant {
    fn from(cell: &Cell) -> Self {
        match cell {
            Cell::Null => RawInstant::Missing,
            Cell::Integer(secs) => RawInstant::Epoch(*secs),
            Cell::Real(secs) => RawInstant::EpochReal(*secs),
            Cell::Text(text) => RawInstant::Text(text.clone()),
        }
    }
}

impl From<DateTime<Utc>> for RawInstant {
    fn from(instant: DateTime<Utc>) -> Self {
        RawInstant::Epoch(instant.timestamp())
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn from_fractional_epoch(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() || secs.abs() > 1e14 {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

fn parse_instant_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(secs) = text.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    text.parse::<f64>().ok().and_then(from_fractional_epoch)
}

/// One story joined with its author's account
///
/// Records are immutable once decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryRecord {
    pub title: Option<String>,
    pub url: Option<String>,
    pub score: i64,
    pub post_time: RawInstant,
    pub author: Option<String>,
    /// The author's reputation at export time
    pub author_karma: Option<f64>,
    pub author_created: RawInstant,
}

impl StoryRecord {
    /// Decodes a story row in the fixed column layout.
    ///
    /// Only the score is required; every other field is decoded leniently
    /// and validated by the feature extractor that needs it.
    pub fn from_row(row: &[Cell]) -> FeatureResult<Self> {
        if row.len() < STORY_COLUMNS {
            return Err(FeatureError::Malformed {
                field: "row",
                value: format!("{} columns, expected {STORY_COLUMNS}", row.len()),
            });
        }
        Ok(Self {
            title: cell_text(&row[0]),
            url: cell_text(&row[1]),
            score: cell_score(&row[2])?,
            post_time: RawInstant::from(&row[3]),
            author: cell_text(&row[4]),
            author_karma: cell_number(&row[5], "karma")?,
            author_created: RawInstant::from(&row[6]),
        })
    }

    /// Score as the value every aggregate is computed over
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn score_value(&self) -> f64 {
        self.score as f64
    }
}

fn cell_text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Null => None,
        Cell::Integer(value) => Some(value.to_string()),
        Cell::Real(value) => Some(value.to_string()),
        Cell::Text(text) => Some(text.clone()),
    }
}

#[expect(clippy::cast_possible_truncation)]
fn cell_score(cell: &Cell) -> FeatureResult<i64> {
    let malformed = |value: String| FeatureError::Malformed {
        field: "score",
        value,
    };
    match cell {
        Cell::Null => Err(FeatureError::Missing { field: "score" }),
        Cell::Integer(value) => Ok(*value),
        Cell::Real(value) if value.is_finite() && value.fract().abs() < f64::EPSILON => {
            Ok(*value as i64)
        }
        Cell::Real(value) => Err(malformed(value.to_string())),
        Cell::Text(text) => text.trim().parse().map_err(|_| malformed(text.clone())),
    }
}

#[expect(clippy::cast_precision_loss)]
fn cell_number(cell: &Cell, field: &'static str) -> FeatureResult<Option<f64>> {
    match cell {
        Cell::Null => Ok(None),
        Cell::Integer(value) => Ok(Some(*value as f64)),
        Cell::Real(value) => Ok(Some(*value)),
        Cell::Text(text) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| FeatureError::Malformed {
                field,
                value: text.clone(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike as _, Timelike as _};

    use super::*;

    fn story_row(score: Cell) -> Row {
        vec![
            Cell::Text("Show HN: a thing".to_owned()),
            Cell::Null,
            score,
            Cell::Integer(1_700_000_000),
            Cell::Text("pg".to_owned()),
            Cell::Integer(155_000),
            Cell::Text("2006-10-09 18:21:51".to_owned()),
        ]
    }

    #[test]
    fn test_decode_story_row() {
        let record = StoryRecord::from_row(&story_row(Cell::Integer(42))).unwrap();
        assert_eq!(record.title.as_deref(), Some("Show HN: a thing"));
        assert_eq!(record.url, None);
        assert_eq!(record.score, 42);
        assert_eq!(record.post_time, RawInstant::Epoch(1_700_000_000));
        assert_eq!(record.author.as_deref(), Some("pg"));
        assert_eq!(record.author_karma, Some(155_000.0));
    }

    #[test]
    fn test_missing_score_rejects_row() {
        assert_eq!(
            StoryRecord::from_row(&story_row(Cell::Null)),
            Err(FeatureError::Missing { field: "score" })
        );
        assert!(StoryRecord::from_row(&story_row(Cell::Text("n/a".to_owned()))).is_err());
        assert_eq!(
            StoryRecord::from_row(&story_row(Cell::Real(7.0))).map(|r| r.score),
            Ok(7)
        );
    }

    #[test]
    fn test_short_row_is_malformed() {
        let err = StoryRecord::from_row(&[Cell::Null, Cell::Integer(1)]).unwrap_err();
        assert!(matches!(err, FeatureError::Malformed { field: "row", .. }));
    }

    #[test]
    fn test_resolve_epoch() {
        let instant = RawInstant::Epoch(0).resolve("time").unwrap();
        assert_eq!(instant, DateTime::UNIX_EPOCH);
        let instant = RawInstant::EpochReal(1.5).resolve("time").unwrap();
        assert_eq!(instant.timestamp_millis(), 1500);
    }

    #[test]
    fn test_resolve_text_formats() {
        let naive = RawInstant::Text("2006-10-09 18:21:51".to_owned())
            .resolve("created")
            .unwrap();
        assert_eq!((naive.year(), naive.month(), naive.day()), (2006, 10, 9));
        assert_eq!(naive.hour(), 18);

        let with_offset = RawInstant::Text("2024-01-01T09:00:00+09:00".to_owned())
            .resolve("time")
            .unwrap();
        assert_eq!(with_offset.hour(), 0);

        let numeric = RawInstant::Text(" 1700000000 ".to_owned())
            .resolve("time")
            .unwrap();
        assert_eq!(numeric.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_resolve_failures() {
        assert_eq!(
            RawInstant::Missing.resolve("time"),
            Err(FeatureError::Missing { field: "time" })
        );
        assert_eq!(
            RawInstant::Text("yesterday".to_owned()).resolve("time"),
            Err(FeatureError::Malformed {
                field: "time",
                value: "yesterday".to_owned()
            })
        );
        assert!(RawInstant::EpochReal(f64::NAN).resolve("time").is_err());
        assert!(RawInstant::Epoch(i64::MAX).resolve("time").is_err());
    }
}
