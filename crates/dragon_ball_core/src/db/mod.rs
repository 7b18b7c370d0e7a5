//! SQLite storage bootstrap and schema entry points.
//!
//! # Responsibility
//! - Open SQLite connections for the catalog.
//! - Create the `series` and `characters` tables on demand.
//!
//! # Invariants
//! - Foreign keys are declared but not enforced; connections leave
//!   `PRAGMA foreign_keys` at its default (off).
//! - Schema creation never drops or rewrites existing rows.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{initialize_schema, table_exists};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
