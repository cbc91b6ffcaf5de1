//! Document-store adapter.
//!
//! Entities live as JSON objects in named collections keyed by an opaque
//! string id. [`DocumentStore`] is the backend seam; [`Db`] wraps a backend
//! with the configured collection names and a cancellation token and adds
//! typed helpers on top.

mod memory;
mod postgres;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// A stored document body. The `id` key is injected on read and never
/// persisted inside the body.
pub type Document = serde_json::Map<String, Value>;

/// Key under which the document id is exposed on read.
pub const ID_FIELD: &str = "id";

/// Generate a new document id (UUIDv7, simple hex form).
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7().simple().to_string()
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt document: {0}")]
    Corrupt(String),

    #[error("Operation cancelled")]
    Cancelled,
}

// ---------------------------------------------------------------------------
// Query primitives
// ---------------------------------------------------------------------------

/// Limit/skip window over a collection in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub skip: i64,
}

impl Page {
    pub fn new(limit: i64, skip: i64) -> Self {
        Self {
            limit: limit.max(0),
            skip: skip.max(0),
        }
    }
}

/// Selects documents of a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Id(DbId),
    Ids(Vec<DbId>),
    /// The array at `field` contains `value`.
    Contains { field: String, value: Value },
}

impl Filter {
    pub fn contains(field: &str, value: impl Into<Value>) -> Self {
        Filter::Contains {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn matches(&self, id: &str, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(wanted) => wanted == id,
            Filter::Ids(wanted) => wanted.iter().any(|w| w == id),
            Filter::Contains { field, value } => match doc.get(field) {
                Some(Value::Array(items)) => items.contains(value),
                _ => false,
            },
        }
    }
}

/// A single-document mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Merge the given top-level fields into the document.
    Set(Document),
    /// Append `value` to the array at `field` unless already present.
    AddToSet { field: String, value: Value },
    /// Remove every occurrence of `value` from the array at `field`.
    Pull { field: String, value: Value },
    /// Move or insert `value` to 0-based `index` of the array at `field`,
    /// dropping its other occurrences. An index past the end appends.
    InsertAt {
        field: String,
        value: Value,
        index: usize,
    },
}

impl Update {
    pub fn set(field: &str, value: impl Into<Value>) -> Self {
        let mut fields = Document::new();
        fields.insert(field.to_string(), value.into());
        Update::Set(fields)
    }

    pub fn add_to_set(field: &str, value: impl Into<Value>) -> Self {
        Update::AddToSet {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn pull(field: &str, value: impl Into<Value>) -> Self {
        Update::Pull {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn insert_at(field: &str, value: impl Into<Value>, index: usize) -> Self {
        Update::InsertAt {
            field: field.to_string(),
            value: value.into(),
            index,
        }
    }

    /// Apply the update in place. Returns whether the document changed.
    ///
    /// A missing or `null` array field counts as empty.
    pub fn apply(&self, doc: &mut Document) -> Result<bool, StoreError> {
        match self {
            Update::Set(fields) => {
                let mut changed = false;
                for (key, value) in fields {
                    if doc.get(key) != Some(value) {
                        doc.insert(key.clone(), value.clone());
                        changed = true;
                    }
                }
                Ok(changed)
            }
            Update::AddToSet { field, value } => {
                let slot = doc.entry(field.clone()).or_insert(Value::Null);
                if slot.is_null() {
                    *slot = Value::Array(Vec::new());
                }
                let items = slot
                    .as_array_mut()
                    .ok_or_else(|| not_an_array(field))?;
                if items.contains(value) {
                    return Ok(false);
                }
                items.push(value.clone());
                Ok(true)
            }
            Update::Pull { field, value } => match doc.get_mut(field) {
                None | Some(Value::Null) => Ok(false),
                Some(Value::Array(items)) => {
                    let before = items.len();
                    items.retain(|item| item != value);
                    Ok(items.len() != before)
                }
                Some(_) => Err(not_an_array(field)),
            },
            Update::InsertAt {
                field,
                value,
                index,
            } => {
                let slot = doc.entry(field.clone()).or_insert(Value::Null);
                if slot.is_null() {
                    *slot = Value::Array(Vec::new());
                }
                let items = slot
                    .as_array_mut()
                    .ok_or_else(|| not_an_array(field))?;
                let mut placed: Vec<Value> =
                    items.iter().filter(|item| *item != value).cloned().collect();
                placed.insert((*index).min(placed.len()), value.clone());
                if *items == placed {
                    return Ok(false);
                }
                *items = placed;
                Ok(true)
            }
        }
    }
}

fn not_an_array(field: &str) -> StoreError {
    StoreError::Corrupt(format!("field '{field}' is not an array"))
}

/// Matched/modified counts of an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

impl UpdateOutcome {
    pub fn is_matched(&self) -> bool {
        self.matched > 0
    }

    pub fn is_modified(&self) -> bool {
        self.modified > 0
    }
}

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// Storage backend for JSON documents grouped in named collections.
///
/// Returned documents carry their id under [`ID_FIELD`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return its newly assigned id.
    async fn insert_one(&self, collection: &str, body: Document) -> Result<DbId, StoreError>;

    async fn find_by_id(&self, collection: &str, id: &str)
        -> Result<Option<Document>, StoreError>;

    /// List documents in insertion order.
    async fn find_many(&self, collection: &str, page: Page) -> Result<Vec<Document>, StoreError>;

    /// Return the subset of `ids` that exist in the collection.
    async fn existing_ids(&self, collection: &str, ids: &[DbId]) -> Result<Vec<DbId>, StoreError>;

    async fn update_one(
        &self,
        collection: &str,
        id: &str,
        update: &Update,
    ) -> Result<UpdateOutcome, StoreError>;

    async fn update_many(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Delete a document, returning the number of documents removed.
    async fn delete_one(&self, collection: &str, id: &str) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Names of the four catalog collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collections {
    pub films: String,
    pub persons: String,
    pub censors: String,
    pub selections: String,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            films: "films".to_string(),
            persons: "persons".to_string(),
            censors: "censors".to_string(),
            selections: "selections".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Db handle
// ---------------------------------------------------------------------------

/// Cheaply cloneable store handle shared by repositories.
///
/// Every call checks the cancellation token first and races it while the
/// backend works; a cancelled call fails with [`StoreError::Cancelled`].
#[derive(Clone)]
pub struct Db {
    store: Arc<dyn DocumentStore>,
    collections: Arc<Collections>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("collections", &self.collections)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl Db {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        collections: Collections,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            store,
            collections: Arc::new(collections),
            cancel,
        }
    }

    /// A fresh in-memory store with default collection names.
    pub fn memory() -> Self {
        Self::new(
            Arc::new(MemoryDocumentStore::new()),
            Collections::default(),
            CancellationToken::new(),
        )
    }

    /// The same store and collections, governed by another token.
    pub fn with_cancel(&self, cancel: CancellationToken) -> Self {
        Self {
            store: Arc::clone(&self.store),
            collections: Arc::clone(&self.collections),
            cancel,
        }
    }

    /// A handle whose token is a child of this one: cancelling it leaves
    /// the parent untouched, cancelling the parent cancels it too.
    pub fn child(&self) -> Self {
        self.with_cancel(self.cancel.child_token())
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    async fn guard<T>(
        &self,
        op: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        if self.cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(StoreError::Cancelled),
            result = op => result,
        }
    }

    // ----- Raw document operations -----

    pub async fn insert_one(&self, collection: &str, body: Document) -> Result<DbId, StoreError> {
        self.guard(self.store.insert_one(collection, body)).await
    }

    pub async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.guard(self.store.find_by_id(collection, id)).await
    }

    pub async fn find_many(&self, collection: &str, page: Page) -> Result<Vec<Document>, StoreError> {
        self.guard(self.store.find_many(collection, page)).await
    }

    pub async fn existing_ids(
        &self,
        collection: &str,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, StoreError> {
        self.guard(self.store.existing_ids(collection, ids)).await
    }

    pub async fn update_one(
        &self,
        collection: &str,
        id: &str,
        update: &Update,
    ) -> Result<UpdateOutcome, StoreError> {
        self.guard(self.store.update_one(collection, id, update)).await
    }

    pub async fn update_many(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateOutcome, StoreError> {
        self.guard(self.store.update_many(collection, filter, update))
            .await
    }

    pub async fn delete_one(&self, collection: &str, id: &str) -> Result<u64, StoreError> {
        self.guard(self.store.delete_one(collection, id)).await
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.guard(self.store.ping()).await
    }

    // ----- Typed helpers -----

    /// Serialize an entity and insert it. Any `id` key is dropped; the store
    /// assigns the id.
    pub async fn insert<T: Serialize>(&self, collection: &str, entity: &T) -> Result<DbId, StoreError> {
        let mut body = match serde_json::to_value(entity)? {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::Corrupt(format!(
                    "entity serialized to {other} instead of an object"
                )))
            }
        };
        body.remove(ID_FIELD);
        self.insert_one(collection, body).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        self.find_by_id(collection, id)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        page: Page,
    ) -> Result<Vec<T>, StoreError> {
        self.find_many(collection, page)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn exists(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let found = self.existing_ids(collection, &[id.to_string()]).await?;
        Ok(!found.is_empty())
    }

    /// Ids from `ids` absent from the collection, in request order.
    ///
    /// An empty request is answered without touching the store.
    pub async fn missing_ids(&self, collection: &str, ids: &[DbId]) -> Result<Vec<DbId>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let existing = self.existing_ids(collection, ids).await?;
        Ok(catalog_core::validation::missing_ids(ids, &existing))
    }
}

fn decode<T: DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}
