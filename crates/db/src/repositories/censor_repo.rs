//! Repository for the `censors` collection.
//!
//! A censor's film list is a ranking: order matters and an id appears at
//! most once.

use catalog_core::types::DbId;

use crate::models::censor::{dedup_ranked, Censor, CreateCensor, FILMS, NAME};
use crate::store::{Db, Page, StoreError, Update};

/// Provides operations on censor documents.
pub struct CensorRepo;

impl CensorRepo {
    /// Insert a new censor. Returns `None` without writing when any initial
    /// film does not exist.
    pub async fn create(db: &Db, input: CreateCensor) -> Result<Option<Censor>, StoreError> {
        let mut censor = input.into_censor();
        let collections = db.collections();
        if !db.missing_ids(&collections.films, &censor.films).await?.is_empty() {
            return Ok(None);
        }
        censor.id = db.insert(&collections.censors, &censor).await?;
        Ok(Some(censor))
    }

    pub async fn find_by_id(db: &Db, id: &str) -> Result<Option<Censor>, StoreError> {
        db.get(&db.collections().censors, id).await
    }

    pub async fn list(db: &Db, page: Page) -> Result<Vec<Censor>, StoreError> {
        db.list(&db.collections().censors, page).await
    }

    pub async fn delete(db: &Db, id: &str) -> Result<bool, StoreError> {
        Ok(db.delete_one(&db.collections().censors, id).await? > 0)
    }

    pub async fn change_name(db: &Db, id: &str, name: &str) -> Result<bool, StoreError> {
        let outcome = db
            .update_one(&db.collections().censors, id, &Update::set(NAME, name))
            .await?;
        Ok(outcome.is_modified())
    }

    /// Replace the whole ranking. Rejected entirely if any film is missing.
    pub async fn set_films_top(db: &Db, id: &str, films: Vec<DbId>) -> Result<bool, StoreError> {
        let collections = db.collections();
        let films = dedup_ranked(films);
        if !db.missing_ids(&collections.films, &films).await?.is_empty() {
            return Ok(false);
        }
        let outcome = db
            .update_one(&collections.censors, id, &Update::set(FILMS, films))
            .await?;
        Ok(outcome.is_modified())
    }

    /// Put a film at 1-based `place` in the ranking, moving it if already
    /// ranked. Places past the end append; 0 counts as first.
    ///
    /// The move is one store update, so references pulled concurrently are
    /// not written back.
    pub async fn add_film(
        db: &Db,
        id: &str,
        film_id: &str,
        place: usize,
    ) -> Result<bool, StoreError> {
        let collections = db.collections();
        if !db.exists(&collections.films, film_id).await? {
            return Ok(false);
        }
        let update = Update::insert_at(FILMS, film_id, place.saturating_sub(1));
        let outcome = db.update_one(&collections.censors, id, &update).await?;
        Ok(outcome.is_modified())
    }

    pub async fn delete_film(db: &Db, id: &str, film_id: &str) -> Result<bool, StoreError> {
        let outcome = db
            .update_one(&db.collections().censors, id, &Update::pull(FILMS, film_id))
            .await?;
        Ok(outcome.is_modified())
    }
}
