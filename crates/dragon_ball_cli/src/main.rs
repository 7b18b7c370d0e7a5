//! Catalog demo driver.
//!
//! # Responsibility
//! - Seed an empty catalog, print it, apply one update and one delete, and
//!   print the characters again.
//! - Report each failing step and keep going with the next one.

use dragon_ball_core::{
    core_version, default_log_level, delete_by_id, fetch_all, init_logging, initialize_schema,
    open_db, seed::seed_database, update_fields, CharacterPatch, Patch, RepoError, Table,
    DEFAULT_DB_PATH,
};
use log::{error, info};
use rusqlite::Connection;
use std::io::{self, Write};
use std::process::ExitCode;

const DB_PATH_ENV: &str = "DRAGON_BALL_DB";
const LOG_LEVEL_ENV: &str = "DRAGON_BALL_LOG_LEVEL";
const LOG_DIR_ENV: &str = "DRAGON_BALL_LOG_DIR";

const UPDATED_CHARACTER_ID: i64 = 1;
const UPDATED_EPISODE_COUNT: i64 = 154;
const DELETED_CHARACTER_ID: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
struct DriverConfig {
    db_path: String,
    log_level: String,
    log_dir: Option<String>,
}

impl DriverConfig {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            db_path: lookup(DB_PATH_ENV).unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            log_level: lookup(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: lookup(LOG_DIR_ENV).filter(|dir| !dir.trim().is_empty()),
        }
    }

    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn main() -> ExitCode {
    let config = DriverConfig::from_env();
    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("logging disabled: {err}");
    }

    info!(
        "event=cli_start module=cli status=ok core_version={} db_path={}",
        core_version(),
        config.db_path
    );

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            println!("{err}");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "Connected to {}, sqlite version: {}",
        config.db_path,
        rusqlite::version()
    );

    if let Err(err) = run(&conn, &mut io::stdout().lock()) {
        error!("event=report module=cli status=error error={err}");
        eprintln!("{err}");
    }

    if let Err((_, err)) = conn.close() {
        error!("event=db_close module=cli status=error error={err}");
        println!("{err}");
        return ExitCode::FAILURE;
    }
    info!("event=db_close module=cli status=ok");
    ExitCode::SUCCESS
}

fn run(conn: &Connection, out: &mut impl Write) -> io::Result<()> {
    match initialize_schema(conn) {
        Ok(()) => writeln!(
            out,
            "Tables 'series' and 'characters' have been created successfully."
        )?,
        Err(err) => writeln!(out, "{err}")?,
    }

    let mut inserted = Vec::new();
    let seeded = seed_database(conn, |table, id| inserted.push((table, id)));
    for (table, id) in inserted {
        match table {
            Table::Series => writeln!(out, "Inserted series with ID: {id}")?,
            Table::Characters => writeln!(out, "Inserted character with ID: {id}")?,
        }
    }
    if let Err(err) = seeded {
        error!("event=seed module=cli status=error error={err}");
        writeln!(out, "{err}")?;
    }

    print_table(conn, out, Table::Series, "Series:")?;
    print_table(conn, out, Table::Characters, "Characters:")?;

    let patch = Patch::Character(CharacterPatch {
        episode_count: Some(UPDATED_EPISODE_COUNT),
        ..CharacterPatch::default()
    });
    // A statement that matches no row still ran fine; report it like any update.
    match update_fields(conn, UPDATED_CHARACTER_ID, &patch) {
        Ok(()) | Err(RepoError::NotFound { .. }) => writeln!(
            out,
            "Record in table '{}' with id {} has been updated.",
            patch.table(),
            UPDATED_CHARACTER_ID
        )?,
        Err(err) => writeln!(out, "{err}")?,
    }

    match delete_by_id(conn, Table::Characters, DELETED_CHARACTER_ID) {
        Ok(()) | Err(RepoError::NotFound { .. }) => writeln!(
            out,
            "Record in table '{}' with id {} has been deleted.",
            Table::Characters,
            DELETED_CHARACTER_ID
        )?,
        Err(err) => writeln!(out, "{err}")?,
    }

    print_table(
        conn,
        out,
        Table::Characters,
        "Characters after update and deletion:",
    )
}

fn print_table(
    conn: &Connection,
    out: &mut impl Write,
    table: Table,
    heading: &str,
) -> io::Result<()> {
    match fetch_all(conn, table) {
        Ok(records) => {
            writeln!(out, "{heading}")?;
            for record in records {
                writeln!(out, "{record}")?;
            }
        }
        Err(err) => {
            error!("event=fetch_all module=cli status=error table={table} error={err}");
            writeln!(out, "{err}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, DriverConfig, DB_PATH_ENV, LOG_DIR_ENV};
    use dragon_ball_core::seed::{SEED_CHARACTERS, SEED_SERIES};
    use dragon_ball_core::{default_log_level, open_db_in_memory, DEFAULT_DB_PATH};
    use rusqlite::Connection;

    fn run_to_lines(conn: &Connection) -> Vec<String> {
        let mut out = Vec::new();
        run(conn, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn position(lines: &[String], wanted: &str) -> usize {
        lines
            .iter()
            .position(|line| line == wanted)
            .unwrap_or_else(|| panic!("missing line `{wanted}`"))
    }

    #[test]
    fn run_prints_steps_in_order() {
        let conn = open_db_in_memory().unwrap();
        let lines = run_to_lines(&conn);

        let created = position(
            &lines,
            "Tables 'series' and 'characters' have been created successfully.",
        );
        let first_series = position(&lines, "Inserted series with ID: 1");
        let last_character = position(
            &lines,
            &format!("Inserted character with ID: {}", SEED_CHARACTERS.len()),
        );
        let series = position(&lines, "Series:");
        let characters = position(&lines, "Characters:");
        let updated = position(
            &lines,
            "Record in table 'characters' with id 1 has been updated.",
        );
        let deleted = position(
            &lines,
            "Record in table 'characters' with id 7 has been deleted.",
        );
        let final_dump = position(&lines, "Characters after update and deletion:");

        assert_eq!(created, 0);
        assert!(created < first_series);
        assert!(first_series < last_character);
        assert!(last_character < series);
        assert_eq!(characters, series + SEED_SERIES.len() + 1);
        assert_eq!(updated, characters + SEED_CHARACTERS.len() + 1);
        assert_eq!(deleted, updated + 1);
        assert_eq!(final_dump, deleted + 1);
    }

    #[test]
    fn final_dump_reflects_update_and_delete() {
        let conn = open_db_in_memory().unwrap();
        let lines = run_to_lines(&conn);

        let final_dump = position(&lines, "Characters after update and deletion:");
        let rows = &lines[final_dump + 1..];
        assert_eq!(rows.len(), SEED_CHARACTERS.len() - 1);
        assert_eq!(rows[0], "(1, 1, 'Goku', 1, 154, 'No')");
        assert!(rows.iter().all(|row| !row.starts_with("(7, ")));
    }

    #[test]
    fn second_run_reports_success_and_reaches_final_dump() {
        let conn = open_db_in_memory().unwrap();
        run_to_lines(&conn);
        let lines = run_to_lines(&conn);

        position(
            &lines,
            "Record in table 'characters' with id 1 has been updated.",
        );
        position(
            &lines,
            "Record in table 'characters' with id 7 has been deleted.",
        );
        assert!(lines.iter().all(|line| !line.starts_with("no row in")));

        let final_dump = position(&lines, "Characters after update and deletion:");
        let rows = &lines[final_dump + 1..];
        assert_eq!(rows.len(), 2 * SEED_CHARACTERS.len() - 1);
        assert_eq!(
            position(&lines, "Inserted series with ID: 8"),
            SEED_SERIES.len()
        );
    }

    #[test]
    fn config_defaults_without_environment() {
        let config = DriverConfig::from_lookup(|_| None);
        assert_eq!(config.db_path, DEFAULT_DB_PATH);
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn config_reads_overrides_and_ignores_blank_log_dir() {
        let config = DriverConfig::from_lookup(|key| match key {
            DB_PATH_ENV => Some("/tmp/other.db".to_string()),
            LOG_DIR_ENV => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.db_path, "/tmp/other.db");
        assert_eq!(config.log_dir, None);
    }
}
