//! Series repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert, update, read and delete rows of the `series` table.
//!
//! # Invariants
//! - Deleting a series never touches `characters`.

use super::{apply_assignments, delete_by_id, text_or_null, RepoResult, Table};
use crate::model::series::{NewSeries, Series, SeriesId, SeriesPatch};
use log::{debug, error};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

const SERIES_SELECT_SQL: &str = "SELECT
    id,
    name,
    episodes,
    start_date,
    end_date
FROM series";

/// Repository interface for series CRUD operations.
pub trait SeriesRepository {
    fn insert_series(&self, series: &NewSeries) -> RepoResult<SeriesId>;
    fn update_series(&self, id: SeriesId, patch: &SeriesPatch) -> RepoResult<()>;
    fn get_series(&self, id: SeriesId) -> RepoResult<Option<Series>>;
    fn list_series(&self) -> RepoResult<Vec<Series>>;
    fn delete_series(&self, id: SeriesId) -> RepoResult<()>;
}

/// SQLite-backed series repository.
pub struct SqliteSeriesRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSeriesRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SeriesRepository for SqliteSeriesRepository<'_> {
    fn insert_series(&self, series: &NewSeries) -> RepoResult<SeriesId> {
        series.validate()?;

        let result = self.conn.execute(
            "INSERT INTO series (name, episodes, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                series.name.as_str(),
                series.episodes,
                series.start_date.as_deref(),
                series.end_date.as_deref(),
            ],
        );
        if let Err(err) = result {
            error!(
                "event=row_insert module=repo status=error table=series error={}",
                err
            );
            return Err(err.into());
        }

        let id = self.conn.last_insert_rowid();
        debug!("event=row_insert module=repo status=ok table=series id={id}");
        Ok(id)
    }

    fn update_series(&self, id: SeriesId, patch: &SeriesPatch) -> RepoResult<()> {
        patch.validate()?;

        let mut assignments: Vec<(&'static str, Value)> = Vec::new();
        if let Some(name) = &patch.name {
            assignments.push(("name", Value::Text(name.clone())));
        }
        if let Some(episodes) = patch.episodes {
            assignments.push(("episodes", Value::Integer(episodes)));
        }
        if let Some(start_date) = &patch.start_date {
            assignments.push(("start_date", text_or_null(start_date.clone())));
        }
        if let Some(end_date) = &patch.end_date {
            assignments.push(("end_date", text_or_null(end_date.clone())));
        }

        apply_assignments(self.conn, Table::Series, id, assignments)
    }

    fn get_series(&self, id: SeriesId) -> RepoResult<Option<Series>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SERIES_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_series_row(row)?));
        }

        Ok(None)
    }

    fn list_series(&self) -> RepoResult<Vec<Series>> {
        let mut stmt = self.conn.prepare(&format!("{SERIES_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut series = Vec::new();

        while let Some(row) = rows.next()? {
            series.push(parse_series_row(row)?);
        }

        Ok(series)
    }

    fn delete_series(&self, id: SeriesId) -> RepoResult<()> {
        delete_by_id(self.conn, Table::Series, id)
    }
}

fn parse_series_row(row: &Row<'_>) -> RepoResult<Series> {
    Ok(Series {
        id: row.get("id")?,
        name: row.get("name")?,
        episodes: row.get("episodes")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
    })
}
