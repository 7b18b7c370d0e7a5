//! Series records.

use super::{fmt_opt_text, validate_name, ValidationError};
use std::fmt::{Display, Formatter};

pub type SeriesId = i64;

/// Insert payload for a new series row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeries {
    pub name: String,
    pub episodes: i64,
    /// ISO date by convention, not validated.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl NewSeries {
    pub fn new(
        name: impl Into<String>,
        episodes: i64,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            episodes,
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("series", &self.name)
    }
}

/// Persisted series row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub id: SeriesId,
    pub name: String,
    pub episodes: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Display for Series {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, '{}', {}, ", self.id, self.name, self.episodes)?;
        fmt_opt_text(self.start_date.as_deref(), f)?;
        f.write_str(", ")?;
        fmt_opt_text(self.end_date.as_deref(), f)?;
        f.write_str(")")
    }
}

/// Partial update for a series row. `None` leaves a column untouched.
///
/// Date columns are nullable, so `Some(None)` writes SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesPatch {
    pub name: Option<String>,
    pub episodes: Option<i64>,
    pub start_date: Option<Option<String>>,
    pub end_date: Option<Option<String>>,
}

impl SeriesPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.episodes.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => validate_name("series", name),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewSeries, Series, SeriesPatch};
    use crate::model::ValidationError;

    #[test]
    fn display_renders_row_tuple() {
        let series = Series {
            id: 1,
            name: "Dragon Ball".to_string(),
            episodes: 153,
            start_date: Some("1986-02-26".to_string()),
            end_date: None,
        };
        assert_eq!(
            series.to_string(),
            "(1, 'Dragon Ball', 153, '1986-02-26', None)"
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        let series = NewSeries::new("  ", 10, None, None);
        assert_eq!(
            series.validate(),
            Err(ValidationError::EmptyName { table: "series" })
        );
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(SeriesPatch::default().is_empty());
        let patch = SeriesPatch {
            end_date: Some(None),
            ..SeriesPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
