//! Film models and DTOs.
//!
//! Defines the stored `Film` document with its embedded seasons and the
//! create/update inputs accepted by the API layer.

use catalog_core::error::CoreError;
use catalog_core::film::{clamp_age_limit, Engagement, FilmKind, ReleaseType};
use catalog_core::patch::Patch;
use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::require_non_empty;
use serde::{Deserialize, Serialize};

use crate::models::ChangeSet;

// ----- Field names -----

pub const STUFF: &str = "stuff";
pub const RELATED_FILMS: &str = "related_films";
pub const SEASONS: &str = "seasons";
pub const SCORE: &str = "score";
pub const SCORE_COUNT: &str = "score_count";

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A film document from the `films` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: DbId,
    pub name: String,
    pub banner: String,
    pub description: String,
    pub country: String,
    #[serde(default)]
    pub kind: FilmKind,
    #[serde(default)]
    pub release_type: ReleaseType,
    #[serde(default)]
    pub age_limit: u32,
    pub duration_secs: Option<u64>,
    pub release: Option<Timestamp>,
    pub start_screening: Option<Timestamp>,
    pub end_screening: Option<Timestamp>,
    pub content: Option<String>,
    pub fees: Option<i64>,
    #[serde(flatten)]
    pub engagement: Engagement,
    #[serde(default)]
    pub images: Vec<String>,
    /// Person ids.
    #[serde(default)]
    pub stuff: Vec<DbId>,
    #[serde(default)]
    pub articles: Vec<String>,
    #[serde(default)]
    pub trailers: Vec<String>,
    #[serde(default)]
    pub tizers: Vec<String>,
    /// Film ids, kept symmetric.
    #[serde(default)]
    pub related_films: Vec<DbId>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub nominations: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<Season>,
}

impl Film {
    pub fn is_serial(&self) -> bool {
        self.kind == FilmKind::Serial
    }

    pub fn is_film(&self) -> bool {
        self.kind == FilmKind::Film
    }

    pub fn is_release(&self) -> bool {
        self.release_type == ReleaseType::Release
    }

    pub fn is_premiere(&self) -> bool {
        self.release_type == ReleaseType::Premiere
    }

    pub fn is_screening(&self) -> bool {
        self.release_type == ReleaseType::Screening
    }
}

/// One season of a serial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub num: u32,
    pub banner: String,
    #[serde(default)]
    pub serias: Vec<Seria>,
}

impl Season {
    pub fn new(num: u32, banner: String, serias: Vec<Seria>) -> Result<Self, CoreError> {
        require_non_empty("Season", "banner", &banner)?;
        Ok(Self {
            num,
            banner,
            serias,
        })
    }
}

/// One episode: its number and the id of the media file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seria {
    pub num: u32,
    pub file_id: String,
}

impl Seria {
    pub fn new(num: u32, file_id: String) -> Result<Self, CoreError> {
        require_non_empty("Seria", "file_id", &file_id)?;
        Ok(Self { num, file_id })
    }
}

// ---------------------------------------------------------------------------
// Create DTOs
// ---------------------------------------------------------------------------

/// Input for creating a new film.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFilm {
    pub name: String,
    pub banner: String,
    pub description: String,
    pub country: String,
    #[serde(default)]
    pub kind: FilmKind,
    #[serde(default)]
    pub release_type: ReleaseType,
    #[serde(default)]
    pub age_limit: u32,
    pub duration_secs: Option<u64>,
    pub release: Option<Timestamp>,
    pub start_screening: Option<Timestamp>,
    pub end_screening: Option<Timestamp>,
    pub content: Option<String>,
    pub fees: Option<i64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stuff: Vec<DbId>,
    #[serde(default)]
    pub articles: Vec<String>,
    #[serde(default)]
    pub trailers: Vec<String>,
    #[serde(default)]
    pub tizers: Vec<String>,
    #[serde(default)]
    pub related_films: Vec<DbId>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub nominations: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<SeasonInput>,
}

impl CreateFilm {
    /// Build the film entity. The id stays empty until the store assigns one.
    pub fn into_film(self) -> Result<Film, CoreError> {
        let seasons = self
            .seasons
            .into_iter()
            .map(SeasonInput::into_season)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Film {
            id: DbId::new(),
            name: self.name,
            banner: self.banner,
            description: self.description,
            country: self.country,
            kind: self.kind,
            release_type: self.release_type,
            age_limit: clamp_age_limit(self.age_limit),
            duration_secs: self.duration_secs,
            release: self.release,
            start_screening: self.start_screening,
            end_screening: self.end_screening,
            content: self.content,
            fees: self.fees,
            engagement: Engagement::default(),
            images: self.images,
            stuff: self.stuff,
            articles: self.articles,
            trailers: self.trailers,
            tizers: self.tizers,
            related_films: self.related_films,
            genres: self.genres,
            nominations: self.nominations,
            seasons,
        })
    }
}

/// Season as submitted on create or on a full seasons replace.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonInput {
    pub num: u32,
    pub banner: String,
    #[serde(default)]
    pub serias: Vec<SeriaInput>,
}

impl SeasonInput {
    pub fn into_season(self) -> Result<Season, CoreError> {
        let serias = self
            .serias
            .into_iter()
            .map(|s| Seria::new(s.num, s.file_id))
            .collect::<Result<Vec<_>, _>>()?;
        Season::new(self.num, self.banner, serias)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriaInput {
    pub num: u32,
    pub file_id: String,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Merge-patch input for a film. Missing keys leave fields untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateFilm {
    pub name: Patch<String>,
    pub banner: Patch<String>,
    pub description: Patch<String>,
    pub country: Patch<String>,
    pub kind: Patch<FilmKind>,
    pub release_type: Patch<ReleaseType>,
    pub age_limit: Patch<u32>,
    pub duration_secs: Patch<u64>,
    pub release: Patch<Timestamp>,
    pub start_screening: Patch<Timestamp>,
    pub end_screening: Patch<Timestamp>,
    pub content: Patch<String>,
    pub fees: Patch<i64>,
    pub stuff: Patch<Vec<DbId>>,
    pub related_films: Patch<Vec<DbId>>,
}

impl UpdateFilm {
    pub fn into_changes(self) -> Result<ChangeSet, CoreError> {
        let mut changes = ChangeSet::new();
        changes.required("name", self.name)?;
        changes.required("banner", self.banner)?;
        changes.required("description", self.description)?;
        changes.required("country", self.country)?;
        changes.required("kind", self.kind)?;
        changes.required("release_type", self.release_type)?;
        changes.required("age_limit", self.age_limit.map(clamp_age_limit))?;
        changes.nullable("duration_secs", self.duration_secs)?;
        changes.nullable("release", self.release)?;
        changes.nullable("start_screening", self.start_screening)?;
        changes.nullable("end_screening", self.end_screening)?;
        changes.nullable("content", self.content)?;
        changes.nullable("fees", self.fees)?;
        changes.required(STUFF, self.stuff)?;
        changes.required(RELATED_FILMS, self.related_films)?;
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn minimal() -> CreateFilm {
        CreateFilm {
            name: "Stalker".into(),
            banner: "banner.png".into(),
            description: "Zone".into(),
            country: "USSR".into(),
            ..Default::default()
        }
    }

    #[test]
    fn into_film_clamps_age_limit() {
        let film = CreateFilm {
            age_limit: 21,
            ..minimal()
        }
        .into_film()
        .unwrap();
        assert_eq!(film.age_limit, 18);
        assert!(film.id.is_empty());
    }

    #[test]
    fn empty_season_banner_is_rejected() {
        let input = CreateFilm {
            seasons: vec![SeasonInput {
                num: 1,
                banner: String::new(),
                serias: vec![],
            }],
            ..minimal()
        };
        assert!(input.into_film().is_err());
    }

    #[test]
    fn empty_seria_file_is_rejected() {
        let season = SeasonInput {
            num: 1,
            banner: "s1.png".into(),
            serias: vec![SeriaInput {
                num: 1,
                file_id: " ".into(),
            }],
        };
        assert!(season.into_season().is_err());
    }

    #[test]
    fn derived_flags_follow_kind_and_release_type() {
        let film = CreateFilm {
            kind: FilmKind::Serial,
            release_type: ReleaseType::Premiere,
            ..minimal()
        }
        .into_film()
        .unwrap();
        assert!(film.is_serial() && !film.is_film());
        assert!(film.is_premiere() && !film.is_release() && !film.is_screening());
    }

    #[test]
    fn engagement_is_flattened_into_the_document() {
        let film = minimal().into_film().unwrap();
        let value = serde_json::to_value(&film).unwrap();
        assert_eq!(value["view_count"], json!(0));
        assert_eq!(value["kind"], json!(0));
        let back: Film = serde_json::from_value(value).unwrap();
        assert_eq!(back, film);
    }

    #[test]
    fn update_maps_patches_to_changes() {
        let update: UpdateFilm = serde_json::from_value(json!({
            "name": "Mirror",
            "age_limit": 40,
            "fees": null,
        }))
        .unwrap();
        let changes = update.into_changes().unwrap();
        let fields = changes.fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["age_limit"], json!(18));
        assert_eq!(fields["fees"], serde_json::Value::Null);
    }

    #[test]
    fn update_rejects_null_for_required_fields() {
        let update: UpdateFilm = serde_json::from_value(json!({"name": null})).unwrap();
        assert!(update.into_changes().is_err());
    }

    #[test]
    fn update_rejects_unknown_enum_code() {
        assert!(serde_json::from_value::<UpdateFilm>(json!({"kind": 5})).is_err());
    }
}
