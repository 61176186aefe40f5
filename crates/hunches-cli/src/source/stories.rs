//! Story batch query
//!
//! All analyses read through the same query over the `items` and `users`
//! tables, narrowed by [`StoryFilter`]s. Rows come back in the column layout
//! [`StoryRecord::from_row`] expects.

use hunches_analysis::record::StoryRecord;

use super::{RowSource, SourceError};

/// Narrows the story batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryFilter {
    RequireTitle,
    RequireUrl,
    RequireAuthor,
    /// Only stories whose author has a user record (inner join)
    WithAuthorAccount,
}

const SELECT_STORIES: &str = r#"SELECT i.title, i.url, i.score, i.time, i."by", u.karma, u.created
FROM items i"#;

/// Builds the story query for `filters`.
#[must_use]
pub fn story_query(filters: &[StoryFilter]) -> String {
    let join = if filters.contains(&StoryFilter::WithAuthorAccount) {
        "JOIN"
    } else {
        "LEFT JOIN"
    };
    let mut sql = format!(
        "{SELECT_STORIES}\n{join} users u ON i.\"by\" = u.id\n\
         WHERE i.type = 'story' AND (i.dead IS NULL OR i.dead = 0)"
    );
    for filter in filters {
        let condition = match filter {
            StoryFilter::RequireTitle => "i.title IS NOT NULL",
            StoryFilter::RequireUrl => "i.url IS NOT NULL",
            StoryFilter::RequireAuthor => "i.\"by\" IS NOT NULL",
            StoryFilter::WithAuthorAccount => continue,
        };
        sql.push_str(" AND ");
        sql.push_str(condition);
    }
    sql
}

/// Fetches every story matching `filters`.
///
/// Rows that cannot be decoded are logged and skipped.
pub fn fetch_stories(
    source: &dyn RowSource,
    filters: &[StoryFilter],
) -> Result<Vec<StoryRecord>, SourceError> {
    let sql = story_query(filters);
    tracing::debug!(%sql, "fetching stories");
    let rows = source.query(&sql)?;

    let total = rows.len();
    let stories = rows
        .iter()
        .filter_map(|row| {
            StoryRecord::from_row(row)
                .inspect_err(|err| tracing::warn!(error = %err, "skipping undecodable story row"))
                .ok()
        })
        .collect::<Vec<_>>();
    if stories.len() < total {
        tracing::warn!(
            skipped = total - stories.len(),
            total,
            "some story rows could not be decoded"
        );
    }
    tracing::info!(stories = stories.len(), "fetched stories");
    Ok(stories)
}
