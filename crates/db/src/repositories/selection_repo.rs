//! Repository for the `selections` collection.

use catalog_core::types::DbId;

use crate::models::censor::dedup_ranked;
use crate::models::selection::{validate_name, CreateSelection, FilmSelection, FILMS, NAME};
use crate::repositories::RepoError;
use crate::store::{Db, Page, StoreError, Update};

/// Provides operations on film selection documents.
pub struct SelectionRepo;

impl SelectionRepo {
    /// Insert a new selection. Returns `None` without writing when any
    /// initial film does not exist; an empty name is a validation error.
    pub async fn create(db: &Db, input: CreateSelection) -> Result<Option<FilmSelection>, RepoError> {
        let mut selection = input.into_selection()?;
        let collections = db.collections();
        if !db.missing_ids(&collections.films, &selection.films).await?.is_empty() {
            return Ok(None);
        }
        selection.id = db.insert(&collections.selections, &selection).await?;
        Ok(Some(selection))
    }

    pub async fn find_by_id(db: &Db, id: &str) -> Result<Option<FilmSelection>, StoreError> {
        db.get(&db.collections().selections, id).await
    }

    pub async fn list(db: &Db, page: Page) -> Result<Vec<FilmSelection>, StoreError> {
        db.list(&db.collections().selections, page).await
    }

    pub async fn delete(db: &Db, id: &str) -> Result<bool, StoreError> {
        Ok(db.delete_one(&db.collections().selections, id).await? > 0)
    }

    pub async fn change_name(db: &Db, id: &str, name: &str) -> Result<bool, RepoError> {
        validate_name(name)?;
        let outcome = db
            .update_one(&db.collections().selections, id, &Update::set(NAME, name))
            .await?;
        Ok(outcome.is_modified())
    }

    /// Add an existing film to the selection unless already present.
    pub async fn add_film(db: &Db, id: &str, film_id: &str) -> Result<bool, StoreError> {
        let collections = db.collections();
        if !db.exists(&collections.films, film_id).await? {
            return Ok(false);
        }
        let outcome = db
            .update_one(&collections.selections, id, &Update::add_to_set(FILMS, film_id))
            .await?;
        Ok(outcome.is_modified())
    }

    /// Replace the film set. Rejected entirely if any film is missing.
    pub async fn set_films(db: &Db, id: &str, films: Vec<DbId>) -> Result<bool, StoreError> {
        let collections = db.collections();
        let films = dedup_ranked(films);
        if !db.missing_ids(&collections.films, &films).await?.is_empty() {
            return Ok(false);
        }
        let outcome = db
            .update_one(&collections.selections, id, &Update::set(FILMS, films))
            .await?;
        Ok(outcome.is_modified())
    }

    pub async fn delete_film(db: &Db, id: &str, film_id: &str) -> Result<bool, StoreError> {
        let outcome = db
            .update_one(&db.collections().selections, id, &Update::pull(FILMS, film_id))
            .await?;
        Ok(outcome.is_modified())
    }
}
