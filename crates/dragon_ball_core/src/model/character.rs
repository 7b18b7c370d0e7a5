//! Character records and the `died` status.
//!
//! # Invariants
//! - `died` is stored as exactly `"Yes"` or `"No"`.
//! - `series_id` is not checked against existing series.

use super::series::SeriesId;
use super::{validate_name, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type CharacterId = i64;

/// Whether a character died during the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Died {
    Yes,
    No,
}

impl Died {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl Display for Died {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the two `died` literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiedParseError(pub String);

impl Display for DiedParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid died value `{}`; expected Yes|No", self.0)
    }
}

impl Error for DiedParseError {}

impl FromStr for Died {
    type Err = DiedParseError;

    // Case-sensitive: the CHECK constraint is.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Yes" => Ok(Self::Yes),
            "No" => Ok(Self::No),
            other => Err(DiedParseError(other.to_string())),
        }
    }
}

/// Insert payload for a new character row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharacter {
    pub series_id: SeriesId,
    pub name: String,
    pub first_episode: i64,
    pub episode_count: i64,
    pub died: Died,
}

impl NewCharacter {
    pub fn new(
        series_id: SeriesId,
        name: impl Into<String>,
        first_episode: i64,
        episode_count: i64,
        died: Died,
    ) -> Self {
        Self {
            series_id,
            name: name.into(),
            first_episode,
            episode_count,
            died,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("characters", &self.name)
    }
}

/// Persisted character row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: CharacterId,
    pub series_id: SeriesId,
    pub name: String,
    pub first_episode: i64,
    pub episode_count: i64,
    pub died: Died,
}

impl Display for Character {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, '{}', {}, {}, '{}')",
            self.id, self.series_id, self.name, self.first_episode, self.episode_count, self.died
        )
    }
}

/// Partial update for a character row. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterPatch {
    pub series_id: Option<SeriesId>,
    pub name: Option<String>,
    pub first_episode: Option<i64>,
    pub episode_count: Option<i64>,
    pub died: Option<Died>,
}

impl CharacterPatch {
    pub fn is_empty(&self) -> bool {
        self.series_id.is_none()
            && self.name.is_none()
            && self.first_episode.is_none()
            && self.episode_count.is_none()
            && self.died.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => validate_name("characters", name),
            None => Ok(()),
        }
    }
}
