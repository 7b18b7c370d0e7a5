//! Catalog schema creation.
//!
//! # Responsibility
//! - Create `series` and `characters` when they are absent.
//!
//! # Invariants
//! - Creation is idempotent: existing tables and rows are left untouched.
//! - `characters.died` only accepts `'Yes'` or `'No'`.

use crate::db::DbResult;
use log::{error, info};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates both catalog tables if they do not exist yet.
///
/// Safe to call on every start-up. Failures are logged and returned.
pub fn initialize_schema(conn: &Connection) -> DbResult<()> {
    match conn.execute_batch(SCHEMA_SQL) {
        Ok(()) => {
            info!("event=schema_init module=db status=ok tables=series,characters");
            Ok(())
        }
        Err(err) => {
            error!(
                "event=schema_init module=db status=error error_code=schema_failed error={}",
                err
            );
            Err(err.into())
        }
    }
}

/// Returns whether a table with the given name exists.
pub fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
