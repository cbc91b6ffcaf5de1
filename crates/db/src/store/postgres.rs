//! PostgreSQL backend: every collection shares the `documents` table and
//! bodies are stored as JSONB.

use async_trait::async_trait;
use catalog_core::types::DbId;
use serde_json::{json, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{new_id, Document, DocumentStore, Filter, Page, StoreError, Update, UpdateOutcome, ID_FIELD};

/// Document store over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_document(id: String, body: Json<Value>) -> Result<Document, StoreError> {
    match body.0 {
        Value::Object(mut map) => {
            map.insert(ID_FIELD.to_string(), Value::String(id));
            Ok(map)
        }
        other => Err(StoreError::Corrupt(format!(
            "document {id} has a non-object body: {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// SQL fragments
// ---------------------------------------------------------------------------

/// Push the array stored at `field`, treating a missing or `null` value as
/// an empty array.
fn push_array_at(qb: &mut QueryBuilder<'_, Postgres>, field: &str) {
    qb.push("COALESCE(NULLIF(body -> ");
    qb.push_bind(field.to_string());
    qb.push("::text, 'null'::jsonb), '[]'::jsonb)");
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {
            qb.push("TRUE");
        }
        Filter::Id(id) => {
            qb.push("id = ");
            qb.push_bind(id.clone());
        }
        Filter::Ids(ids) => {
            qb.push("id = ANY(");
            qb.push_bind(ids.clone());
            qb.push(")");
        }
        Filter::Contains { field, value } => {
            qb.push("jsonb_typeof(body -> ");
            qb.push_bind(field.clone());
            qb.push("::text) = 'array' AND body -> ");
            qb.push_bind(field.clone());
            qb.push("::text @> ");
            qb.push_bind(Json(json!([value])));
        }
    }
}

/// Push the array at `field` with `value` moved to 0-based `index`.
///
/// Surviving elements keep their order key below the index and shift by one
/// at or above it; `value` takes key `index + 1`, so an index past the end
/// lands last.
fn push_ranked_array(
    qb: &mut QueryBuilder<'_, Postgres>,
    field: &str,
    value: &Value,
    index: usize,
) {
    let index = i64::try_from(index).unwrap_or(i64::MAX - 1);
    qb.push("(SELECT jsonb_agg(ranked.e ORDER BY ranked.k) FROM (SELECT kept.e, CASE WHEN kept.n <= ");
    qb.push_bind(index);
    qb.push(" THEN kept.n ELSE kept.n + 1 END AS k FROM (SELECT elems.e, row_number() OVER (ORDER BY elems.n) AS n FROM jsonb_array_elements(");
    push_array_at(qb, field);
    qb.push(") WITH ORDINALITY AS elems(e, n) WHERE elems.e <> ");
    qb.push_bind(Json(value.clone()));
    qb.push(") kept UNION ALL SELECT ");
    qb.push_bind(Json(value.clone()));
    qb.push(", ");
    qb.push_bind(index);
    qb.push(" + 1) ranked)");
}

/// Push `<new body expression>` for the update.
fn push_new_body(qb: &mut QueryBuilder<'_, Postgres>, update: &Update) {
    match update {
        Update::Set(fields) => {
            qb.push("body || ");
            qb.push_bind(Json(Value::Object(fields.clone())));
        }
        Update::AddToSet { field, value } => {
            qb.push("jsonb_set(body, ARRAY[");
            qb.push_bind(field.clone());
            qb.push("::text], ");
            push_array_at(qb, field);
            qb.push(" || ");
            qb.push_bind(Json(json!([value])));
            qb.push(")");
        }
        Update::Pull { field, value } => {
            qb.push("jsonb_set(body, ARRAY[");
            qb.push_bind(field.clone());
            qb.push("::text], COALESCE((SELECT jsonb_agg(elems.e ORDER BY elems.n) FROM jsonb_array_elements(");
            push_array_at(qb, field);
            qb.push(") WITH ORDINALITY AS elems(e, n) WHERE elems.e <> ");
            qb.push_bind(Json(value.clone()));
            qb.push("), '[]'::jsonb))");
        }
        Update::InsertAt {
            field,
            value,
            index,
        } => {
            qb.push("jsonb_set(body, ARRAY[");
            qb.push_bind(field.clone());
            qb.push("::text], ");
            push_ranked_array(qb, field, value, *index);
            qb.push(")");
        }
    }
}

/// Push the condition under which the update actually changes the body.
fn push_changed(qb: &mut QueryBuilder<'_, Postgres>, update: &Update) {
    match update {
        Update::Set(fields) => {
            qb.push("(body || ");
            qb.push_bind(Json(Value::Object(fields.clone())));
            qb.push(") IS DISTINCT FROM body");
        }
        Update::AddToSet { field, value } => {
            qb.push("NOT (");
            push_array_at(qb, field);
            qb.push(" @> ");
            qb.push_bind(Json(json!([value])));
            qb.push(")");
        }
        Update::Pull { field, value } => {
            push_array_at(qb, field);
            qb.push(" @> ");
            qb.push_bind(Json(json!([value])));
        }
        Update::InsertAt {
            field,
            value,
            index,
        } => {
            push_ranked_array(qb, field, value, *index);
            qb.push(" IS DISTINCT FROM ");
            push_array_at(qb, field);
        }
    }
}

// ---------------------------------------------------------------------------
// DocumentStore impl
// ---------------------------------------------------------------------------

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(&self, collection: &str, mut body: Document) -> Result<DbId, StoreError> {
        body.remove(ID_FIELD);
        let id = new_id();
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(Json(Value::Object(body)))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let row: Option<(String, Json<Value>)> = sqlx::query_as(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|(id, body)| into_document(id, body)).transpose()
    }

    async fn find_many(&self, collection: &str, page: Page) -> Result<Vec<Document>, StoreError> {
        let rows: Vec<(String, Json<Value>)> = sqlx::query_as(
            "SELECT id, body FROM documents
             WHERE collection = $1
             ORDER BY created_at ASC, id ASC
             LIMIT $2 OFFSET $3",
        )
        .bind(collection)
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|(id, body)| into_document(id, body))
            .collect()
    }

    async fn existing_ids(&self, collection: &str, ids: &[DbId]) -> Result<Vec<DbId>, StoreError> {
        let found: Vec<String> = sqlx::query_scalar(
            "SELECT id FROM documents WHERE collection = $1 AND id = ANY($2)",
        )
        .bind(collection)
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(found)
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

    /// Counts matched and modified rows in one statement: `target` selects
    /// the filtered ids, `updated` rewrites those whose body would change.
    async fn update_many(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "WITH target AS (SELECT id FROM documents WHERE collection = ",
        );
        qb.push_bind(collection.to_string());
        qb.push(" AND ");
        push_filter(&mut qb, filter);
        qb.push("), updated AS (UPDATE documents SET body = ");
        push_new_body(&mut qb, update);
        qb.push(", updated_at = now() WHERE collection = ");
        qb.push_bind(collection.to_string());
        qb.push(" AND id IN (SELECT id FROM target) AND ");
        push_changed(&mut qb, update);
        qb.push(" RETURNING id) SELECT (SELECT COUNT(*) FROM target), (SELECT COUNT(*) FROM updated)");

        let (matched, modified): (i64, i64) =
            qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(UpdateOutcome {
            matched: u64::try_from(matched).unwrap_or(0),
            modified: u64::try_from(modified).unwrap_or(0),
        })
    }

    async fn delete_one(&self, collection: &str, id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
