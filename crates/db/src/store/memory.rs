//! In-process document store used by tests and by the server when no
//! database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use catalog_core::types::DbId;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{new_id, Document, DocumentStore, Filter, Page, StoreError, Update, UpdateOutcome, ID_FIELD};

/// Collections held as insertion-ordered vectors behind one lock, so each
/// operation is atomic with respect to the others.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<(DbId, Document)>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn with_id(id: &str, body: &Document) -> Document {
    let mut doc = body.clone();
    doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    doc
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(&self, collection: &str, mut body: Document) -> Result<DbId, StoreError> {
        body.remove(ID_FIELD);
        let id = new_id();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), body));
        Ok(id)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == id))
            .map(|(doc_id, body)| with_id(doc_id, body)))
    }

    async fn find_many(&self, collection: &str, page: Page) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().await;
        let skip = usize::try_from(page.skip).unwrap_or(0);
        let limit = usize::try_from(page.limit).unwrap_or(0);
        Ok(guard
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .skip(skip)
                    .take(limit)
                    .map(|(id, body)| with_id(id, body))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn existing_ids(&self, collection: &str, ids: &[DbId]) -> Result<Vec<DbId>, StoreError> {
        let guard = self.collections.read().await;
        let Some(docs) = guard.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(id, _)| id.clone())
            .collect())
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &str,
        update: &Update,
    ) -> Result<UpdateOutcome, StoreError> {
        self.update_many(collection, &Filter::Id(id.to_string()), update)
            .await
    }

    async fn update_many(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut guard = self.collections.write().await;
        let mut outcome = UpdateOutcome::default();
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(outcome);
        };
        for (id, body) in docs.iter_mut() {
            if !filter.matches(id, body) {
                continue;
            }
            outcome.matched += 1;
            // Apply to a copy so a failed update leaves the document intact.
            let mut next = body.clone();
            if update.apply(&mut next)? {
                *body = next;
                outcome.modified += 1;
            }
        }
        Ok(outcome)
    }

    async fn delete_one(&self, collection: &str, id: &str) -> Result<u64, StoreError> {
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|(doc_id, _)| doc_id == id) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(value: Value) -> Document {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn insert_assigns_id_and_find_injects_it() {
        let store = MemoryDocumentStore::new();
        let id = store
            .insert_one("films", body(json!({"id": "ignored", "name": "Solaris"})))
            .await
            .unwrap();
        assert_ne!(id, "ignored");

        let found = store.find_by_id("films", &id).await.unwrap().unwrap();
        assert_eq!(found["id"], json!(id));
        assert_eq!(found["name"], json!("Solaris"));
        assert!(store.find_by_id("films", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_many_pages_in_insertion_order() {
        let store = MemoryDocumentStore::new();
        for n in 0..5 {
            store.insert_one("films", body(json!({"n": n}))).await.unwrap();
        }
        let page = store.find_many("films", Page::new(2, 2)).await.unwrap();
        let ns: Vec<_> = page.iter().map(|d| d["n"].clone()).collect();
        assert_eq!(ns, vec![json!(2), json!(3)]);
        assert!(store.find_many("persons", Page::new(10, 0)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_counts_matched_and_modified() {
        let store = MemoryDocumentStore::new();
        let a = store.insert_one("films", body(json!({"stuff": ["p1"]}))).await.unwrap();
        store.insert_one("films", body(json!({"stuff": ["p1", "p2"]}))).await.unwrap();
        store.insert_one("films", body(json!({"stuff": []}))).await.unwrap();

        let outcome = store
            .update_one("films", &a, &Update::add_to_set("stuff", "p1"))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 0 });

        let outcome = store
            .update_many("films", &Filter::contains("stuff", "p1"), &Update::pull("stuff", "p1"))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 2, modified: 2 });

        let outcome = store
            .update_one("films", "missing", &Update::set("name", "x"))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::default());
    }

    #[tokio::test]
    async fn failed_update_leaves_document_intact() {
        let store = MemoryDocumentStore::new();
        let id = store.insert_one("films", body(json!({"name": "x"}))).await.unwrap();
        assert!(store
            .update_one("films", &id, &Update::add_to_set("name", "y"))
            .await
            .is_err());
        let found = store.find_by_id("films", &id).await.unwrap().unwrap();
        assert_eq!(found["name"], json!("x"));
    }

    #[tokio::test]
    async fn delete_and_existing_ids() {
        let store = MemoryDocumentStore::new();
        let a = store.insert_one("persons", Document::new()).await.unwrap();
        let b = store.insert_one("persons", Document::new()).await.unwrap();

        let existing = store
            .existing_ids("persons", &[a.clone(), "ghost".into(), b.clone()])
            .await
            .unwrap();
        assert_eq!(existing.len(), 2);

        assert_eq!(store.delete_one("persons", &a).await.unwrap(), 1);
        assert_eq!(store.delete_one("persons", &a).await.unwrap(), 0);
        assert_eq!(store.existing_ids("persons", &[a]).await.unwrap(), Vec::<DbId>::new());
    }
}
