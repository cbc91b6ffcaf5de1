//! Repository for the `persons` collection.

use catalog_core::error::CoreError;

use crate::models::film::STUFF;
use crate::models::outcome::{DeleteReport, LinkOutcome};
use crate::models::person::{CreatePerson, Person, UpdatePerson, FILMS, NOMINATIONS};
use crate::repositories::links::{apply_two_sided, sweep, Side};
use crate::repositories::RepoError;
use crate::store::{Db, Filter, Page, StoreError, Update};

/// Provides operations on person documents.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person.
    ///
    /// Every film in `films` must exist; once the person is stored its id is
    /// added to the `stuff` of each of those films.
    pub async fn create(db: &Db, input: CreatePerson) -> Result<Person, RepoError> {
        let mut person = input.into_person()?;
        let collections = db.collections();

        let missing = db.missing_ids(&collections.films, &person.films).await?;
        if !missing.is_empty() {
            return Err(CoreError::MissingReferences {
                persons: Vec::new(),
                films: missing,
            }
            .into());
        }

        person.id = db.insert(&collections.persons, &person).await?;

        if !person.films.is_empty() {
            let outcome = db
                .update_many(
                    &collections.films,
                    &Filter::Ids(person.films.clone()),
                    &Update::add_to_set(STUFF, person.id.as_str()),
                )
                .await?;
            tracing::debug!(
                person_id = %person.id,
                films_linked = outcome.modified,
                "Linked new person into film stuff",
            );
        }
        Ok(person)
    }

    pub async fn find_by_id(db: &Db, id: &str) -> Result<Option<Person>, StoreError> {
        db.get(&db.collections().persons, id).await
    }

    pub async fn list(db: &Db, page: Page) -> Result<Vec<Person>, StoreError> {
        db.list(&db.collections().persons, page).await
    }

    /// Merge-patch a person. Returns `true` if the document changed.
    pub async fn update(db: &Db, id: &str, input: UpdatePerson) -> Result<bool, RepoError> {
        let changes = input.into_changes()?;
        if changes.is_empty() {
            return Ok(false);
        }
        let outcome = db
            .update_one(&db.collections().persons, id, &changes.into_update())
            .await?;
        Ok(outcome.is_modified())
    }

    /// Delete a person and pull its id out of every film's stuff.
    pub async fn delete(db: &Db, id: &str) -> Result<DeleteReport, StoreError> {
        let collections = db.collections();
        let deleted = db.delete_one(&collections.persons, id).await? > 0;
        let sweeps = vec![sweep(db, &collections.films, STUFF, id).await?];
        Ok(DeleteReport { deleted, sweeps })
    }

    // ----- Nominations -----

    pub async fn add_nomination(db: &Db, id: &str, nomination: &str) -> Result<bool, StoreError> {
        let outcome = db
            .update_one(
                &db.collections().persons,
                id,
                &Update::add_to_set(NOMINATIONS, nomination),
            )
            .await?;
        Ok(outcome.is_modified())
    }

    pub async fn delete_nomination(
        db: &Db,
        id: &str,
        nomination: &str,
    ) -> Result<bool, StoreError> {
        let outcome = db
            .update_one(&db.collections().persons, id, &Update::pull(NOMINATIONS, nomination))
            .await?;
        Ok(outcome.is_modified())
    }

    // ----- Film links -----

    /// Add a film to the person's films and the person to the film's stuff.
    pub async fn add_film(db: &Db, id: &str, film_id: &str) -> Result<LinkOutcome, StoreError> {
        let collections = db.collections();
        if !db.exists(&collections.films, film_id).await? {
            return Ok(LinkOutcome::Failed);
        }
        apply_two_sided(
            db,
            Side {
                collection: &collections.persons,
                id,
                update: Update::add_to_set(FILMS, film_id),
            },
            Side {
                collection: &collections.films,
                id: film_id,
                update: Update::add_to_set(STUFF, id),
            },
        )
        .await
    }

    pub async fn delete_film(db: &Db, id: &str, film_id: &str) -> Result<LinkOutcome, StoreError> {
        let collections = db.collections();
        apply_two_sided(
            db,
            Side {
                collection: &collections.persons,
                id,
                update: Update::pull(FILMS, film_id),
            },
            Side {
                collection: &collections.films,
                id: film_id,
                update: Update::pull(STUFF, id),
            },
        )
        .await
    }
}
