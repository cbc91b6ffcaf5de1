//! Person models and DTOs.

use catalog_core::error::CoreError;
use catalog_core::patch::Patch;
use catalog_core::person::PersonKind;
use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::{require_no_empty_items, require_non_empty};
use serde::{Deserialize, Serialize};

use crate::models::ChangeSet;

pub const FILMS: &str = "films";
pub const NOMINATIONS: &str = "nominations";

const ENTITY: &str = "Person";

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A person document from the `persons` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub kind: PersonKind,
    pub birthday: Timestamp,
    pub photo: String,
    #[serde(default)]
    pub height: u32,
    pub career: String,
    pub birth_place: String,
    /// Film ids the person appears in.
    #[serde(default)]
    pub films: Vec<DbId>,
    #[serde(default)]
    pub nominations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a new person.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerson {
    pub name: String,
    #[serde(default)]
    pub kind: PersonKind,
    pub birthday: Timestamp,
    pub photo: String,
    #[serde(default)]
    pub height: u32,
    pub career: String,
    pub birth_place: String,
    #[serde(default)]
    pub films: Vec<DbId>,
    #[serde(default)]
    pub nominations: Vec<String>,
}

impl CreatePerson {
    /// Validate and build the person entity with an empty id.
    pub fn into_person(self) -> Result<Person, CoreError> {
        require_non_empty(ENTITY, "name", &self.name)?;
        require_non_empty(ENTITY, "photo", &self.photo)?;
        require_non_empty(ENTITY, "career", &self.career)?;
        require_non_empty(ENTITY, "birth_place", &self.birth_place)?;
        require_no_empty_items(ENTITY, FILMS, &self.films)?;
        require_no_empty_items(ENTITY, NOMINATIONS, &self.nominations)?;
        Ok(Person {
            id: DbId::new(),
            name: self.name,
            kind: self.kind,
            birthday: self.birthday,
            photo: self.photo,
            height: self.height,
            career: self.career,
            birth_place: self.birth_place,
            films: self.films,
            nominations: self.nominations,
        })
    }
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Merge-patch input for a person. `nominations` replaces the whole list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePerson {
    pub name: Patch<String>,
    pub kind: Patch<PersonKind>,
    pub birthday: Patch<Timestamp>,
    pub photo: Patch<String>,
    pub height: Patch<u32>,
    pub career: Patch<String>,
    pub birth_place: Patch<String>,
    pub nominations: Patch<Vec<String>>,
}

impl UpdatePerson {
    pub fn into_changes(self) -> Result<ChangeSet, CoreError> {
        for (field, patch) in [
            ("name", &self.name),
            ("photo", &self.photo),
            ("career", &self.career),
            ("birth_place", &self.birth_place),
        ] {
            if let Some(value) = patch.as_value() {
                require_non_empty(ENTITY, field, value)?;
            }
        }
        if let Some(nominations) = self.nominations.as_value() {
            require_no_empty_items(ENTITY, NOMINATIONS, nominations)?;
        }

        let mut changes = ChangeSet::new();
        changes.required("name", self.name)?;
        changes.required("kind", self.kind)?;
        changes.required("birthday", self.birthday)?;
        changes.required("photo", self.photo)?;
        changes.required("height", self.height)?;
        changes.required("career", self.career)?;
        changes.required("birth_place", self.birth_place)?;
        changes.required(NOMINATIONS, self.nominations)?;
        Ok(changes)
    }
}
