//! Repository for the `films` collection.
//!
//! Besides plain CRUD this owns the film side of every cross-document
//! reference: person links (`stuff` / `Person.films`), the symmetric
//! `related_films` relation, and the cascade that prunes a deleted film
//! from persons, censors, selections and other films.

use catalog_core::error::CoreError;
use catalog_core::film::{Counter, FilmList};
use catalog_core::types::DbId;

use crate::models::film::{
    CreateFilm, Film, SeasonInput, UpdateFilm, RELATED_FILMS, SCORE, SCORE_COUNT, SEASONS, STUFF,
};
use crate::models::outcome::{DeleteReport, LinkOutcome};
use crate::models::{censor, person, selection, ChangeSet};
use crate::repositories::links::{apply_two_sided, sweep, Side};
use crate::repositories::RepoError;
use crate::store::{Db, Document, Page, StoreError, Update};

/// Provides operations on film documents.
pub struct FilmRepo;

impl FilmRepo {
    // ----- CRUD -----

    /// Insert a new film after checking every referenced person and film
    /// exists. Nothing is written when a reference is missing.
    pub async fn create(db: &Db, input: CreateFilm) -> Result<Film, RepoError> {
        let mut film = input.into_film()?;
        Self::check_references(db, Some(film.stuff.as_slice()), Some(film.related_films.as_slice()))
            .await?;

        film.id = db.insert(&db.collections().films, &film).await?;
        Ok(film)
    }

    pub async fn find_by_id(db: &Db, id: &str) -> Result<Option<Film>, StoreError> {
        db.get(&db.collections().films, id).await
    }

    pub async fn list(db: &Db, page: Page) -> Result<Vec<Film>, StoreError> {
        db.list(&db.collections().films, page).await
    }

    /// Merge-patch a film. Returns `true` if the document changed.
    ///
    /// Replacement `stuff` / `related_films` lists are validated first and
    /// a missing id rejects the whole patch.
    pub async fn update(db: &Db, id: &str, input: UpdateFilm) -> Result<bool, RepoError> {
        Self::check_references(
            db,
            input.stuff.as_value().map(Vec::as_slice),
            input.related_films.as_value().map(Vec::as_slice),
        )
        .await?;

        let changes = input.into_changes()?;
        Ok(Self::apply_changes(db, id, changes).await?)
    }

    /// Delete a film and prune its id from every collection that refers to
    /// it. The sweeps run even if the film itself was already gone.
    pub async fn delete(db: &Db, id: &str) -> Result<DeleteReport, StoreError> {
        let collections = db.collections();
        let deleted = db.delete_one(&collections.films, id).await? > 0;

        let sweeps = vec![
            sweep(db, &collections.films, RELATED_FILMS, id).await?,
            sweep(db, &collections.censors, censor::FILMS, id).await?,
            sweep(db, &collections.selections, selection::FILMS, id).await?,
            sweep(db, &collections.persons, person::FILMS, id).await?,
        ];

        Ok(DeleteReport { deleted, sweeps })
    }

    // ----- Value lists -----

    /// Add `value` to a film list unless present. Returns `true` if added.
    pub async fn add_to_list(
        db: &Db,
        id: &str,
        list: FilmList,
        value: &str,
    ) -> Result<bool, StoreError> {
        let outcome = db
            .update_one(&db.collections().films, id, &Update::add_to_set(list.field(), value))
            .await?;
        Ok(outcome.is_modified())
    }

    /// Remove `value` from a film list. Returns `true` if removed.
    pub async fn delete_from_list(
        db: &Db,
        id: &str,
        list: FilmList,
        value: &str,
    ) -> Result<bool, StoreError> {
        let outcome = db
            .update_one(&db.collections().films, id, &Update::pull(list.field(), value))
            .await?;
        Ok(outcome.is_modified())
    }

    // ----- Person links -----

    /// Add a person to the film's stuff and the film to the person's films.
    pub async fn add_person(db: &Db, id: &str, person_id: &str) -> Result<LinkOutcome, StoreError> {
        let collections = db.collections();
        if !db.exists(&collections.persons, person_id).await? {
            return Ok(LinkOutcome::Failed);
        }
        apply_two_sided(
            db,
            Side {
                collection: &collections.films,
                id,
                update: Update::add_to_set(STUFF, person_id),
            },
            Side {
                collection: &collections.persons,
                id: person_id,
                update: Update::add_to_set(person::FILMS, id),
            },
        )
        .await
    }

    pub async fn delete_person(
        db: &Db,
        id: &str,
        person_id: &str,
    ) -> Result<LinkOutcome, StoreError> {
        let collections = db.collections();
        apply_two_sided(
            db,
            Side {
                collection: &collections.films,
                id,
                update: Update::pull(STUFF, person_id),
            },
            Side {
                collection: &collections.persons,
                id: person_id,
                update: Update::pull(person::FILMS, id),
            },
        )
        .await
    }

    // ----- Related films -----

    /// Relate two films symmetrically. A film cannot be related to itself.
    pub async fn add_related_film(
        db: &Db,
        id: &str,
        other_id: &str,
    ) -> Result<LinkOutcome, StoreError> {
        let films = &db.collections().films;
        if id == other_id || !db.exists(films, other_id).await? {
            return Ok(LinkOutcome::Failed);
        }
        apply_two_sided(
            db,
            Side {
                collection: films,
                id,
                update: Update::add_to_set(RELATED_FILMS, other_id),
            },
            Side {
                collection: films,
                id: other_id,
                update: Update::add_to_set(RELATED_FILMS, id),
            },
        )
        .await
    }

    pub async fn delete_related_film(
        db: &Db,
        id: &str,
        other_id: &str,
    ) -> Result<LinkOutcome, StoreError> {
        let films = &db.collections().films;
        if id == other_id {
            return Ok(LinkOutcome::Failed);
        }
        apply_two_sided(
            db,
            Side {
                collection: films,
                id,
                update: Update::pull(RELATED_FILMS, other_id),
            },
            Side {
                collection: films,
                id: other_id,
                update: Update::pull(RELATED_FILMS, id),
            },
        )
        .await
    }

    // ----- Seasons -----

    /// Replace the whole seasons list.
    pub async fn update_seasons(
        db: &Db,
        id: &str,
        seasons: Vec<SeasonInput>,
    ) -> Result<bool, RepoError> {
        let seasons = seasons
            .into_iter()
            .map(SeasonInput::into_season)
            .collect::<Result<Vec<_>, _>>()?;

        let mut changes = ChangeSet::new();
        changes.set(SEASONS, seasons)?;
        Ok(Self::apply_changes(db, id, changes).await?)
    }

    // ----- Engagement writes -----

    /// Store a precomputed score and its rating count.
    pub async fn update_score(
        db: &Db,
        id: &str,
        score: f64,
        score_count: u32,
    ) -> Result<bool, StoreError> {
        let mut fields = Document::new();
        fields.insert(SCORE.to_string(), serde_json::Value::from(score));
        fields.insert(SCORE_COUNT.to_string(), serde_json::Value::from(score_count));
        let outcome = db
            .update_one(&db.collections().films, id, &Update::Set(fields))
            .await?;
        Ok(outcome.is_modified())
    }

    /// Store a precomputed counter value.
    pub async fn update_counter(
        db: &Db,
        id: &str,
        counter: Counter,
        value: u32,
    ) -> Result<bool, StoreError> {
        let outcome = db
            .update_one(&db.collections().films, id, &Update::set(counter.field(), value))
            .await?;
        Ok(outcome.is_modified())
    }

    pub async fn update_will_watch_count(db: &Db, id: &str, value: u32) -> Result<bool, StoreError> {
        Self::update_counter(db, id, Counter::WillWatch, value).await
    }

    pub async fn update_share_count(db: &Db, id: &str, value: u32) -> Result<bool, StoreError> {
        Self::update_counter(db, id, Counter::Shares, value).await
    }

    pub async fn update_watched_count(db: &Db, id: &str, value: u32) -> Result<bool, StoreError> {
        Self::update_counter(db, id, Counter::Watched, value).await
    }

    pub async fn update_view_count(db: &Db, id: &str, value: u32) -> Result<bool, StoreError> {
        Self::update_counter(db, id, Counter::Views, value).await
    }

    pub async fn update_not_interesting_count(
        db: &Db,
        id: &str,
        value: u32,
    ) -> Result<bool, StoreError> {
        Self::update_counter(db, id, Counter::NotInteresting, value).await
    }

    // ----- Helpers -----

    async fn apply_changes(db: &Db, id: &str, changes: ChangeSet) -> Result<bool, StoreError> {
        if changes.is_empty() {
            return Ok(false);
        }
        let outcome = db
            .update_one(&db.collections().films, id, &changes.into_update())
            .await?;
        Ok(outcome.is_modified())
    }

    async fn check_references(
        db: &Db,
        person_ids: Option<&[DbId]>,
        film_ids: Option<&[DbId]>,
    ) -> Result<(), RepoError> {
        let collections = db.collections();
        let persons = match person_ids {
            Some(ids) => db.missing_ids(&collections.persons, ids).await?,
            None => Vec::new(),
        };
        let films = match film_ids {
            Some(ids) => db.missing_ids(&collections.films, ids).await?,
            None => Vec::new(),
        };
        if !persons.is_empty() || !films.is_empty() {
            return Err(CoreError::MissingReferences { persons, films }.into());
        }
        Ok(())
    }
}
