use dragon_ball_core::db::{initialize_schema, open_db, open_db_in_memory, table_exists};
use dragon_ball_core::{fetch_all, NewSeries, SeriesRepository, SqliteSeriesRepository, Table};
use rusqlite::Connection;

#[test]
fn fresh_database_has_empty_tables() {
    let conn = open_db_in_memory().unwrap();
    initialize_schema(&conn).unwrap();

    assert!(table_exists(&conn, "series").unwrap());
    assert!(table_exists(&conn, "characters").unwrap());
    assert!(fetch_all(&conn, Table::Series).unwrap().is_empty());
    assert!(fetch_all(&conn, Table::Characters).unwrap().is_empty());
}

#[test]
fn open_db_creates_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dragon_ball.db");
    assert!(!path.exists());

    let conn = open_db(&path).unwrap();
    initialize_schema(&conn).unwrap();
    drop(conn);

    assert!(path.exists());
}

#[test]
fn open_db_fails_for_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("dragon_ball.db");

    assert!(open_db(&path).is_err());
}

#[test]
fn reinitializing_populated_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dragon_ball.db");

    let conn_first = open_db(&path).unwrap();
    initialize_schema(&conn_first).unwrap();
    SqliteSeriesRepository::new(&conn_first)
        .insert_series(&NewSeries::new(
            "Dragon Ball",
            153,
            Some("1986-02-26"),
            Some("1989-04-19"),
        ))
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    initialize_schema(&conn_second).unwrap();
    initialize_schema(&conn_second).unwrap();

    let rows = fetch_all(&conn_second, Table::Series).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id(), 1);
}

#[test]
fn schema_matches_declared_columns() {
    let conn = open_db_in_memory().unwrap();
    initialize_schema(&conn).unwrap();

    assert_eq!(
        column_names(&conn, "series"),
        ["id", "name", "episodes", "start_date", "end_date"]
    );
    assert_eq!(
        column_names(&conn, "characters"),
        [
            "id",
            "series_id",
            "name",
            "first_episode",
            "episode_count",
            "died"
        ]
    );
}

#[test]
fn foreign_keys_are_declared_but_not_enforced() {
    let conn = open_db_in_memory().unwrap();
    initialize_schema(&conn).unwrap();

    let enforced: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enforced, 0);

    let referenced: String = conn
        .query_row(
            "SELECT \"table\" FROM pragma_foreign_key_list('characters');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(referenced, "series");
}

fn column_names(conn: &Connection, table_name: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid;")
        .unwrap();
    stmt.query_map([table_name], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}
