//! Censor models: a named, ranked top list of films.

use catalog_core::types::DbId;
use serde::{Deserialize, Serialize};

pub const NAME: &str = "name";
pub const FILMS: &str = "films";

/// A censor document from the `censors` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Censor {
    pub id: DbId,
    pub name: String,
    /// Film ids, best first.
    #[serde(default)]
    pub films: Vec<DbId>,
}

/// Input for creating a censor.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCensor {
    pub name: String,
    #[serde(default)]
    pub films: Vec<DbId>,
}

impl CreateCensor {
    /// Build the censor entity. Repeated film ids keep their first rank.
    pub fn into_censor(self) -> Censor {
        Censor {
            id: DbId::new(),
            name: self.name,
            films: dedup_ranked(self.films),
        }
    }
}

/// Drop repeated ids, keeping the first occurrence of each.
pub fn dedup_ranked(films: Vec<DbId>) -> Vec<DbId> {
    let mut ranked: Vec<DbId> = Vec::with_capacity(films.len());
    for film in films {
        if !ranked.contains(&film) {
            ranked.push(film);
        }
    }
    ranked
}
