use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppError;

/// A persistent collection of JSON documents keyed by opaque string ids.
///
/// The adapter does no schema validation and offers no transactions; callers
/// own both. `update_fields` is a read-merge-write of the whole document, so
/// concurrent writers to the same id can lose each other's changes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document body, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Value>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Value>, AppError>;

    /// Generates an id, injects it into the body under `"id"`, persists the
    /// document, and returns the id.
    async fn insert(&self, fields: Map<String, Value>) -> Result<String, AppError>;

    /// Merges the given top-level fields into the stored body. Returns
    /// `false` (a no-op, not an error) when the id is absent.
    async fn update_fields(&self, id: &str, fields: Map<String, Value>) -> Result<bool, AppError>;

    /// Returns `false` (a no-op, not an error) when the id is absent.
    async fn delete_one(&self, id: &str) -> Result<bool, AppError>;
}

/// Serializes any document-shaped value into the field map the store accepts.
pub fn to_document<T: Serialize>(value: &T) -> Result<Map<String, Value>, serde_json::Error> {
    serde_json::from_value(serde_json::to_value(value)?)
}

/// `DocumentStore` over a single SQLite table holding one JSON body per row.
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn find_all(&self) -> Result<Vec<Value>, AppError> {
        let rows: Vec<String> = sqlx::query_scalar("SELECT doc FROM courses")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|doc| Ok(serde_json::from_str(doc)?))
            .collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Value>, AppError> {
        let row: Option<String> = sqlx::query_scalar("SELECT doc FROM courses WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, mut fields: Map<String, Value>) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        fields.insert("id".to_string(), Value::String(id.clone()));
        let doc = serde_json::to_string(&Value::Object(fields))?;

        sqlx::query("INSERT INTO courses (id, doc) VALUES (?1, ?2)")
            .bind(&id)
            .bind(&doc)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn update_fields(&self, id: &str, fields: Map<String, Value>) -> Result<bool, AppError> {
        let current: Option<String> = sqlx::query_scalar("SELECT doc FROM courses WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(current) = current else {
            return Ok(false);
        };

        let mut doc: Map<String, Value> = serde_json::from_str(&current)?;
        for (key, value) in fields {
            doc.insert(key, value);
        }
        let updated = serde_json::to_string(&Value::Object(doc))?;

        sqlx::query("UPDATE courses SET doc = ?1 WHERE id = ?2")
            .bind(&updated)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(true)
    }

    async fn delete_one(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
