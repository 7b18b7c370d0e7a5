//! Character repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert, update, read and delete rows of the `characters` table.
//!
//! # Invariants
//! - `series_id` is written as given; the referenced series may not exist.
//! - Read paths reject a persisted `died` outside `Yes|No` instead of
//!   masking it.

use super::{apply_assignments, delete_by_id, RepoError, RepoResult, Table};
use crate::model::character::{Character, CharacterId, CharacterPatch, Died, NewCharacter};
use log::{debug, error};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

const CHARACTER_SELECT_SQL: &str = "SELECT
    id,
    series_id,
    name,
    first_episode,
    episode_count,
    died
FROM characters";

/// Repository interface for character CRUD operations.
pub trait CharacterRepository {
    fn insert_character(&self, character: &NewCharacter) -> RepoResult<CharacterId>;
    fn update_character(&self, id: CharacterId, patch: &CharacterPatch) -> RepoResult<()>;
    fn get_character(&self, id: CharacterId) -> RepoResult<Option<Character>>;
    fn list_characters(&self) -> RepoResult<Vec<Character>>;
    fn delete_character(&self, id: CharacterId) -> RepoResult<()>;
}

/// SQLite-backed character repository.
pub struct SqliteCharacterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCharacterRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CharacterRepository for SqliteCharacterRepository<'_> {
    fn insert_character(&self, character: &NewCharacter) -> RepoResult<CharacterId> {
        character.validate()?;

        let result = self.conn.execute(
            "INSERT INTO characters (
                series_id,
                name,
                first_episode,
                episode_count,
                died
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                character.series_id,
                character.name.as_str(),
                character.first_episode,
                character.episode_count,
                character.died.as_str(),
            ],
        );
        if let Err(err) = result {
            error!(
                "event=row_insert module=repo status=error table=characters error={}",
                err
            );
            return Err(err.into());
        }

        let id = self.conn.last_insert_rowid();
        debug!("event=row_insert module=repo status=ok table=characters id={id}");
        Ok(id)
    }

    fn update_character(&self, id: CharacterId, patch: &CharacterPatch) -> RepoResult<()> {
        patch.validate()?;

        let mut assignments: Vec<(&'static str, Value)> = Vec::new();
        if let Some(series_id) = patch.series_id {
            assignments.push(("series_id", Value::Integer(series_id)));
        }
        if let Some(name) = &patch.name {
            assignments.push(("name", Value::Text(name.clone())));
        }
        if let Some(first_episode) = patch.first_episode {
            assignments.push(("first_episode", Value::Integer(first_episode)));
        }
        if let Some(episode_count) = patch.episode_count {
            assignments.push(("episode_count", Value::Integer(episode_count)));
        }
        if let Some(died) = patch.died {
            assignments.push(("died", Value::Text(died.as_str().to_string())));
        }

        apply_assignments(self.conn, Table::Characters, id, assignments)
    }

    fn get_character(&self, id: CharacterId) -> RepoResult<Option<Character>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHARACTER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_character_row(row)?));
        }

        Ok(None)
    }

    fn list_characters(&self) -> RepoResult<Vec<Character>> {
        let mut stmt = self.conn.prepare(&format!("{CHARACTER_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut characters = Vec::new();

        while let Some(row) = rows.next()? {
            characters.push(parse_character_row(row)?);
        }

        Ok(characters)
    }

    fn delete_character(&self, id: CharacterId) -> RepoResult<()> {
        delete_by_id(self.conn, Table::Characters, id)
    }
}

fn parse_character_row(row: &Row<'_>) -> RepoResult<Character> {
    let died_text: String = row.get("died")?;
    let died = died_text.parse::<Died>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid died value `{died_text}` in characters.died"
        ))
    })?;

    Ok(Character {
        id: row.get("id")?,
        series_id: row.get("series_id")?,
        name: row.get("name")?,
        first_episode: row.get("first_episode")?,
        episode_count: row.get("episode_count")?,
        died,
    })
}
