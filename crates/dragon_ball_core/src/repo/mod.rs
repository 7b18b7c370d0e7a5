//! Repository layer for catalog persistence.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `series` and `characters` tables.
//! - Offer table-generic entry points (`update_fields`, `delete_by_id`,
//!   `fetch_all`) keyed by the closed `Table` allow-list.
//!
//! # Invariants
//! - Table and column identifiers come from compile-time constants only;
//!   every value is a bound parameter.
//! - Each write is a single autocommitted statement.
//! - Write paths validate payloads before SQL mutations.

use crate::db::DbError;
use crate::model::character::{Character, CharacterPatch};
use crate::model::series::{Series, SeriesPatch};
use crate::model::ValidationError;
use log::{debug, error};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub mod character_repo;
pub mod series_repo;

pub use character_repo::{CharacterRepository, SqliteCharacterRepository};
pub use series_repo::{SeriesRepository, SqliteSeriesRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// The two catalog tables. Parsing a table name goes through this allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Series,
    Characters,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Series => "series",
            Self::Characters => "characters",
        }
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = RepoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "series" => Ok(Self::Series),
            "characters" => Ok(Self::Characters),
            other => Err(RepoError::UnknownTable(other.to_string())),
        }
    }
}

/// Repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { table: Table, id: i64 },
    EmptyPatch(Table),
    UnknownTable(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "no row in `{table}` with id {id}"),
            Self::EmptyPatch(table) => write!(f, "update on `{table}` has no fields to set"),
            Self::UnknownTable(name) => {
                write!(f, "unknown table `{name}`; expected series|characters")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::EmptyPatch(_)
            | Self::UnknownTable(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Partial update tagged by the table it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    Series(SeriesPatch),
    Character(CharacterPatch),
}

impl Patch {
    pub fn table(&self) -> Table {
        match self {
            Self::Series(_) => Table::Series,
            Self::Character(_) => Table::Characters,
        }
    }
}

/// One row from either catalog table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Series(Series),
    Character(Character),
}

impl Record {
    pub fn id(&self) -> i64 {
        match self {
            Self::Series(series) => series.id,
            Self::Character(character) => character.id,
        }
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Series(series) => Display::fmt(series, f),
            Self::Character(character) => Display::fmt(character, f),
        }
    }
}

/// Applies a partial update to the row `record_id` of the patch's table.
///
/// # Errors
/// - `EmptyPatch` when the patch sets no column.
/// - `NotFound` when no row has that id.
/// - `Db` for statement failures, including CHECK violations.
pub fn update_fields(conn: &Connection, record_id: i64, patch: &Patch) -> RepoResult<()> {
    match patch {
        Patch::Series(patch) => SqliteSeriesRepository::new(conn).update_series(record_id, patch),
        Patch::Character(patch) => {
            SqliteCharacterRepository::new(conn).update_character(record_id, patch)
        }
    }
}

/// Deletes the row `record_id` from `table`. Dependent rows are left in place.
pub fn delete_by_id(conn: &Connection, table: Table, record_id: i64) -> RepoResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?1;", table.as_str());
    let changed = conn.execute(&sql, [record_id]).map_err(|err| {
        error!(
            "event=row_delete module=repo status=error table={} id={} error={}",
            table, record_id, err
        );
        RepoError::from(err)
    })?;

    if changed == 0 {
        return Err(RepoError::NotFound {
            table,
            id: record_id,
        });
    }

    debug!(
        "event=row_delete module=repo status=ok table={} id={}",
        table, record_id
    );
    Ok(())
}

/// Returns every row of `table` in SQLite's native order.
pub fn fetch_all(conn: &Connection, table: Table) -> RepoResult<Vec<Record>> {
    let records = match table {
        Table::Series => SqliteSeriesRepository::new(conn)
            .list_series()?
            .into_iter()
            .map(Record::Series)
            .collect(),
        Table::Characters => SqliteCharacterRepository::new(conn)
            .list_characters()?
            .into_iter()
            .map(Record::Character)
            .collect(),
    };
    Ok(records)
}

/// Runs `UPDATE <table> SET <columns> WHERE id = ?` for the given assignments.
pub(crate) fn apply_assignments(
    conn: &Connection,
    table: Table,
    record_id: i64,
    assignments: Vec<(&'static str, Value)>,
) -> RepoResult<()> {
    if assignments.is_empty() {
        return Err(RepoError::EmptyPatch(table));
    }

    let set_clause = assignments
        .iter()
        .enumerate()
        .map(|(index, (column, _))| format!("{column} = ?{}", index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE {} SET {set_clause} WHERE id = ?{};",
        table.as_str(),
        assignments.len() + 1
    );

    let mut bind_values: Vec<Value> = assignments.into_iter().map(|(_, value)| value).collect();
    bind_values.push(Value::Integer(record_id));

    let changed = conn
        .execute(&sql, params_from_iter(bind_values))
        .map_err(|err| {
            error!(
                "event=row_update module=repo status=error table={} id={} error={}",
                table, record_id, err
            );
            RepoError::from(err)
        })?;

    if changed == 0 {
        return Err(RepoError::NotFound {
            table,
            id: record_id,
        });
    }

    debug!(
        "event=row_update module=repo status=ok table={} id={}",
        table, record_id
    );
    Ok(())
}

pub(crate) fn text_or_null(value: Option<String>) -> Value {
    match value {
        Some(text) => Value::Text(text),
        None => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::{RepoError, Table};

    #[test]
    fn table_names_go_through_allow_list() {
        assert_eq!("series".parse::<Table>().unwrap(), Table::Series);
        assert_eq!("characters".parse::<Table>().unwrap(), Table::Characters);

        let err = "series; DROP TABLE series".parse::<Table>().unwrap_err();
        assert!(matches!(err, RepoError::UnknownTable(_)));
        assert!("Series".parse::<Table>().is_err());
    }
}
