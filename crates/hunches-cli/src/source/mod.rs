//! Read-only access to the story database
//!
//! The analyses only ever need one operation from the data source: run a
//! query and hand back every row, each cell typed by position. [`RowSource`]
//! is that seam; [`SqliteSource`] implements it over a local `SQLite` export.

pub mod stories;

use std::path::{Path, PathBuf};

use hunches_analysis::record::{Cell, Row};
use rusqlite::{Connection, OpenFlags, types::ValueRef};

/// The data source cannot be opened or a query failed
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SourceError {
    #[display("cannot open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    #[display("query failed: {_0}")]
    Query(rusqlite::Error),
}

/// Executes read-only queries
pub trait RowSource {
    fn query(&self, sql: &str) -> Result<Vec<Row>, SourceError>;
}

/// `SQLite`-backed row source
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    /// Opens an existing database file read-only.
    pub fn open<P>(path: P) -> Result<Self, SourceError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| SourceError::Open {
            path: path.to_owned(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened story database");
        Ok(Self::from_connection(conn))
    }

    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl RowSource for SqliteSource {
    fn query(&self, sql: &str) -> Result<Vec<Row>, SourceError> {
        let mut stmt = self.conn.prepare(sql).map_err(SourceError::Query)?;
        let width = stmt.column_count();
        let mapped = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|index| row.get_ref(index).map(to_cell))
                    .collect::<Result<Row, _>>()
            })
            .map_err(SourceError::Query)?;
        let rows = mapped
            .collect::<Result<Vec<_>, _>>()
            .map_err(SourceError::Query)?;
        tracing::debug!(rows = rows.len(), "query returned");
        Ok(rows)
    }
}

fn to_cell(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Cell::Null,
        ValueRef::Integer(value) => Cell::Integer(value),
        ValueRef::Real(value) => Cell::Real(value),
        ValueRef::Text(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_types_cells_by_position() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (a TEXT, b INTEGER, c REAL, d TEXT);
             INSERT INTO t VALUES ('x', 1, 2.5, NULL);",
        )
        .unwrap();
        let source = SqliteSource::from_connection(conn);

        let rows = source.query("SELECT a, b, c, d FROM t").unwrap();
        assert_eq!(
            rows,
            [vec![
                Cell::Text("x".to_owned()),
                Cell::Integer(1),
                Cell::Real(2.5),
                Cell::Null,
            ]]
        );
    }

    #[test]
    fn test_query_errors() {
        let source = SqliteSource::from_connection(Connection::open_in_memory().unwrap());
        let err = source.query("SELECT * FROM missing").unwrap_err();
        assert!(matches!(err, SourceError::Query(_)));
        assert!(err.to_string().starts_with("query failed: "));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let err = SqliteSource::open(&path).err().unwrap();
        assert!(matches!(err, SourceError::Open { .. }));
        assert!(err.to_string().contains("absent.db"));
    }
}
