//! Film selection models: a named, unordered set of films.

use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_core::validation::require_non_empty;
use serde::{Deserialize, Serialize};

use crate::models::censor::dedup_ranked;

pub const NAME: &str = "name";
pub const FILMS: &str = "films";

/// A selection document from the `selections` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmSelection {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub films: Vec<DbId>,
}

/// Input for creating a selection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSelection {
    pub name: String,
    #[serde(default)]
    pub films: Vec<DbId>,
}

impl CreateSelection {
    pub fn into_selection(self) -> Result<FilmSelection, CoreError> {
        validate_name(&self.name)?;
        Ok(FilmSelection {
            id: DbId::new(),
            name: self.name,
            films: dedup_ranked(self.films),
        })
    }
}

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    require_non_empty("FilmSelection", NAME, name)
}
