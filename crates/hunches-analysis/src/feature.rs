//! Feature extractors
//!
//! Pure functions deriving one secondary attribute from a story. Extractors
//! that can fail return a [`FeatureResult`] instead of panicking; callers
//! decide whether a failure excludes the record or degrades to a default
//! (see [`crate::enrich`]).

use chrono::{DateTime, Datelike as _, Timelike as _, Utc};
use url::Url;

/// Why a feature could not be derived from a record
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum FeatureError {
    /// A required field is absent
    #[display("missing {field}")]
    Missing { field: &'static str },
    /// A field is present but cannot be interpreted
    #[display("malformed {field}: {value:?}")]
    Malformed { field: &'static str, value: String },
}

pub type FeatureResult<T> = Result<T, FeatureError>;

/// Extracts the network location of a URL.
///
/// The host is lower-cased, a leading `www.` label is stripped and the path is
/// discarded. An explicit non-default port is kept (`host:port`).
///
/// # Examples
///
/// ```
/// use hunches_analysis::feature::extract_domain;
///
/// let domain = extract_domain(Some("https://www.Example.com/path")).unwrap();
/// assert_eq!(domain, "example.com");
/// assert!(extract_domain(None).is_err());
/// assert!(extract_domain(Some("not a url")).is_err());
/// ```
pub fn extract_domain(url: Option<&str>) -> FeatureResult<String> {
    let raw = url
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or(FeatureError::Missing { field: "url" })?;
    let malformed = || FeatureError::Malformed {
        field: "url",
        value: raw.to_owned(),
    };

    let parsed = Url::parse(raw).map_err(|_| malformed())?;
    let host = parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(malformed)?
        .to_ascii_lowercase();
    let host = match host.strip_prefix("www.") {
        Some(rest) if !rest.is_empty() => rest.to_owned(),
        _ => host,
    };

    Ok(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    })
}

/// Character count of a title.
///
/// Titles are counted in Unicode scalar values, not bytes.
#[must_use]
pub fn title_length(title: &str) -> usize {
    title.chars().count()
}

/// Civil calendar fields of an instant, in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeFields {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// 0-6, Monday=0
    pub day_of_week: u32,
    /// 0-23
    pub hour: u32,
}

impl TimeFields {
    #[must_use]
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
            day_of_week: instant.weekday().num_days_from_monday(),
            hour: instant.hour(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_strips_www_and_lowercases() {
        assert_eq!(
            extract_domain(Some("https://www.Example.com/path")).as_deref(),
            Ok("example.com")
        );
        assert_eq!(
            extract_domain(Some("http://news.ycombinator.com/item?id=1")).as_deref(),
            Ok("news.ycombinator.com")
        );
    }

    #[test]
    fn test_domain_strips_only_leading_www() {
        assert_eq!(
            extract_domain(Some("https://blog.www.example.org/")).as_deref(),
            Ok("blog.www.example.org")
        );
    }

    #[test]
    fn test_domain_keeps_explicit_port() {
        assert_eq!(
            extract_domain(Some("http://localhost:8080/x")).as_deref(),
            Ok("localhost:8080")
        );
        assert_eq!(
            extract_domain(Some("https://example.com:443/")).as_deref(),
            Ok("example.com")
        );
    }

    #[test]
    fn test_domain_missing_and_malformed() {
        assert_eq!(
            extract_domain(None),
            Err(FeatureError::Missing { field: "url" })
        );
        assert_eq!(
            extract_domain(Some("  ")),
            Err(FeatureError::Missing { field: "url" })
        );
        assert_eq!(
            extract_domain(Some("example.com/no-scheme")),
            Err(FeatureError::Malformed {
                field: "url",
                value: "example.com/no-scheme".to_owned()
            })
        );
        assert!(extract_domain(Some("mailto:someone@example.com")).is_err());
    }

    #[test]
    fn test_title_length_counts_chars() {
        assert_eq!(title_length(""), 0);
        assert_eq!(title_length("Ask HN"), 6);
        assert_eq!(title_length("Café"), 4);
    }

    #[test]
    fn test_time_fields() {
        // 2023-11-14 22:13:20 UTC, a Tuesday
        let instant = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let fields = TimeFields::from_instant(instant);
        assert_eq!(
            fields,
            TimeFields {
                year: 2023,
                month: 11,
                day_of_week: 1,
                hour: 22,
            }
        );
    }

    #[test]
    fn test_time_fields_monday_is_zero() {
        // 1970-01-05 was a Monday
        let instant = DateTime::from_timestamp(4 * 86_400, 0).unwrap();
        assert_eq!(TimeFields::from_instant(instant).day_of_week, 0);
    }
}
