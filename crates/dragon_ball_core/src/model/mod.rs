//! Catalog domain model.
//!
//! # Responsibility
//! - Define the `Series` and `Character` records and their insert payloads.
//! - Define closed partial-update shapes (`SeriesPatch`, `CharacterPatch`).
//!
//! # Invariants
//! - Ids are assigned by SQLite and never chosen by callers.
//! - Names must be non-empty before they reach storage.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod character;
pub mod series;

/// Write-side validation failure raised before any SQL runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A `name` column was empty or whitespace only.
    EmptyName { table: &'static str },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { table } => write!(f, "{table}.name must not be empty"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn validate_name(table: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName { table });
    }
    Ok(())
}

/// Renders an optional text column the way row dumps show it.
pub(crate) fn fmt_opt_text(value: Option<&str>, f: &mut Formatter<'_>) -> std::fmt::Result {
    match value {
        Some(text) => write!(f, "'{text}'"),
        None => f.write_str("None"),
    }
}
