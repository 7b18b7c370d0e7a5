//! Core data access for the Dragon Ball catalog.
//! Owns the SQLite schema, the domain records and their CRUD operations.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;

pub use db::{initialize_schema, open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::character::{
    Character, CharacterId, CharacterPatch, Died, DiedParseError, NewCharacter,
};
pub use model::series::{NewSeries, Series, SeriesId, SeriesPatch};
pub use model::ValidationError;
pub use repo::{
    delete_by_id, fetch_all, update_fields, CharacterRepository, Patch, Record, RepoError,
    RepoResult, SeriesRepository, SqliteCharacterRepository, SqliteSeriesRepository, Table,
};

/// Default database file used by the driver.
pub const DEFAULT_DB_PATH: &str = "dragon_ball.db";

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
