//! Store wrappers that inject concurrent writes and failures into the
//! in-memory backend.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catalog_core::types::DbId;
use catalog_db::models::censor;
use catalog_db::store::{
    Collections, Document, DocumentStore, Filter, MemoryDocumentStore, Page, Update,
    UpdateOutcome,
};
use catalog_db::{Db, StoreError};
use tokio_util::sync::CancellationToken;

/// Delegates to a [`MemoryDocumentStore`] with two optional faults:
///
/// - [`FaultyStore::delete_after_next_film_check`]: the next existence check
///   on `films` is followed by deleting that film and pulling it from every
///   censor, as a concurrent `FilmRepo::delete` would.
/// - [`FaultyStore::failing_pulls_in`]: bulk pulls over that collection fail.
#[derive(Default)]
pub struct FaultyStore {
    inner: MemoryDocumentStore,
    delete_after_film_check: Mutex<Option<DbId>>,
    fail_pulls_in: Option<String>,
}

impl FaultyStore {
    pub fn failing_pulls_in(collection: &str) -> Self {
        Self {
            fail_pulls_in: Some(collection.to_string()),
            ..Default::default()
        }
    }

    pub fn delete_after_next_film_check(&self, film_id: &str) {
        *self.delete_after_film_check.lock().unwrap() = Some(film_id.to_string());
    }

    pub fn db(self: &Arc<Self>) -> Db {
        let store: Arc<dyn DocumentStore> = self.clone();
        Db::new(store, Collections::default(), CancellationToken::new())
    }
}

#[async_trait]
impl DocumentStore for FaultyStore {
    async fn insert_one(&self, collection: &str, body: Document) -> Result<DbId, StoreError> {
        self.inner.insert_one(collection, body).await
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.find_by_id(collection, id).await
    }

    async fn find_many(&self, collection: &str, page: Page) -> Result<Vec<Document>, StoreError> {
        self.inner.find_many(collection, page).await
    }

    async fn existing_ids(&self, collection: &str, ids: &[DbId]) -> Result<Vec<DbId>, StoreError> {
        let found = self.inner.existing_ids(collection, ids).await?;
        if collection == "films" {
            let doomed = self.delete_after_film_check.lock().unwrap().take();
            if let Some(doomed) = doomed {
                self.inner.delete_one("films", &doomed).await?;
                self.inner
                    .update_many(
                        "censors",
                        &Filter::contains(censor::FILMS, doomed.as_str()),
                        &Update::pull(censor::FILMS, doomed.as_str()),
                    )
                    .await?;
            }
        }
        Ok(found)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &str,
        update: &Update,
    ) -> Result<UpdateOutcome, StoreError> {
        self.inner.update_one(collection, id, update).await
    }

    async fn update_many(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateOutcome, StoreError> {
        if matches!(update, Update::Pull { .. })
            && self.fail_pulls_in.as_deref() == Some(collection)
        {
            return Err(StoreError::Corrupt(format!("{collection} is unavailable")));
        }
        self.inner.update_many(collection, filter, update).await
    }

    async fn delete_one(&self, collection: &str, id: &str) -> Result<u64, StoreError> {
        self.inner.delete_one(collection, id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}
