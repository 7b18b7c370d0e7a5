//! Demonstration dataset for an empty catalog.
//!
//! # Invariants
//! - Characters reference series by position (1-based), which matches the ids
//!   SQLite assigns when the series are inserted into an empty table.

use crate::model::character::{Died, NewCharacter};
use crate::model::series::NewSeries;
use crate::repo::{
    CharacterRepository, RepoResult, SeriesRepository, SqliteCharacterRepository,
    SqliteSeriesRepository, Table,
};
use rusqlite::Connection;

/// `(name, episodes, start_date, end_date)`
pub const SEED_SERIES: &[(&str, i64, &str, &str)] = &[
    ("Dragon Ball", 153, "1986-02-26", "1989-04-19"),
    ("Dragon Ball Z", 291, "1989-04-26", "1996-01-31"),
    ("Dragon Ball GT", 64, "1996-02-07", "1997-11-19"),
    ("Dragon Ball Super", 131, "2015-07-05", "2018-03-25"),
];

/// `(series_id, name, first_episode, episode_count, died)`
pub const SEED_CHARACTERS: &[(i64, &str, i64, i64, Died)] = &[
    (1, "Goku", 1, 153, Died::No),
    (2, "Goku", 1, 291, Died::Yes),
    (3, "Goku", 1, 64, Died::No),
    (4, "Goku", 1, 131, Died::No),
    (2, "Vegeta", 6, 247, Died::Yes),
    (3, "Vegeta", 1, 64, Died::No),
    (4, "Vegeta", 6, 116, Died::No),
    (1, "Piccolo", 23, 78, Died::No),
    (2, "Piccolo", 1, 155, Died::Yes),
    (3, "Piccolo", 1, 64, Died::No),
    (4, "Piccolo", 1, 131, Died::No),
    (1, "Kuririn", 14, 136, Died::Yes),
    (2, "Kuririn", 1, 194, Died::No),
    (3, "Kuririn", 1, 64, Died::Yes),
    (4, "Kuririn", 1, 69, Died::No),
    (2, "Gohan", 1, 195, Died::Yes),
    (3, "Gohan", 1, 64, Died::No),
    (4, "Gohan", 1, 80, Died::No),
    (2, "Trunks", 107, 84, Died::Yes),
    (3, "Trunks", 1, 64, Died::No),
    (4, "Trunks", 1, 78, Died::No),
    (2, "Goten", 180, 61, Died::Yes),
    (3, "Goten", 1, 64, Died::No),
    (4, "Goten", 1, 26, Died::No),
    (2, "Frieza", 44, 33, Died::Yes),
    (4, "Frieza", 19, 57, Died::No),
    (1, "Tien", 14, 137, Died::Yes),
    (2, "Tien", 1, 68, Died::Yes),
    (3, "Tien", 1, 64, Died::No),
    (4, "Tien", 1, 29, Died::No),
    (1, "Yamcha", 5, 96, Died::Yes),
    (2, "Yamcha", 1, 40, Died::Yes),
    (3, "Yamcha", 1, 64, Died::No),
    (4, "Yamcha", 1, 19, Died::No),
];

/// Ids assigned while seeding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub series_ids: Vec<i64>,
    pub character_ids: Vec<i64>,
}

fn seed_series() -> Vec<NewSeries> {
    SEED_SERIES
        .iter()
        .map(|&(name, episodes, start, end)| NewSeries::new(name, episodes, Some(start), Some(end)))
        .collect()
}

fn seed_characters() -> Vec<NewCharacter> {
    SEED_CHARACTERS
        .iter()
        .map(|&(series_id, name, first_episode, episode_count, died)| {
            NewCharacter::new(series_id, name, first_episode, episode_count, died)
        })
        .collect()
}

/// Inserts every seed series, then every seed character.
///
/// `on_insert` is called with the table and assigned id after each row.
/// Stops at the first failing insert; rows inserted before it stay committed.
pub fn seed_database(
    conn: &Connection,
    mut on_insert: impl FnMut(Table, i64),
) -> RepoResult<SeedReport> {
    let series_repo = SqliteSeriesRepository::new(conn);
    let character_repo = SqliteCharacterRepository::new(conn);
    let mut report = SeedReport::default();

    for series in seed_series() {
        let id = series_repo.insert_series(&series)?;
        on_insert(Table::Series, id);
        report.series_ids.push(id);
    }

    for character in seed_characters() {
        let id = character_repo.insert_character(&character)?;
        on_insert(Table::Characters, id);
        report.character_ids.push(id);
    }

    Ok(report)
}
