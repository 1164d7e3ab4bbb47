//! Document store implementation.
//!
//! Only the surface the linking engine consumes lives here: the title corpus
//! read plus enough write helpers to drive regeneration. Routing, request
//! validation, authorization, and caching are other services' concerns.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use wikigraph_core::{
    new_v7, CreateDocumentRequest, Document, DocumentStatus, DocumentStore, Error, Result,
    TitleEntry,
};

/// PostgreSQL implementation of DocumentStore.
pub struct PgDocumentStore {
    pool: Pool<Postgres>,
}

impl PgDocumentStore {
    /// Create a new PgDocumentStore with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn map_document(row: &sqlx::postgres::PgRow) -> Result<Document> {
        let status: String = row.get("status");
        let status = DocumentStatus::from_str_loose(&status)
            .ok_or_else(|| Error::Internal(format!("Unknown document status: {status}")))?;
        Ok(Document {
            id: row.get("id"),
            title: row.get("title"),
            slug: row.get("slug"),
            content: row.get("content"),
            status,
            created_at_utc: row.get("created_at_utc"),
            updated_at_utc: row.get("updated_at_utc"),
        })
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list_titles(&self) -> Result<Vec<TitleEntry>> {
        // Ordered by id so corpus iteration order is stable across scans;
        // the dedupe tie-break in the matcher depends on a stable order.
        let rows = sqlx::query(
            "SELECT id, title, slug FROM document
             WHERE status = 'published'
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| TitleEntry {
                id: row.get("id"),
                title: row.get("title"),
                slug: row.get("slug"),
            })
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Document> {
        let row = sqlx::query(
            "SELECT id, title, slug, content, status, created_at_utc, updated_at_utc
             FROM document WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::DocumentNotFound(id))?;

        Self::map_document(&row)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Document> {
        let row = sqlx::query(
            "SELECT id, title, slug, content, status, created_at_utc, updated_at_utc
             FROM document WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or_else(|| Error::NotFound(format!("document slug {slug}")))?;

        Self::map_document(&row)
    }

    async fn insert(&self, req: CreateDocumentRequest) -> Result<Uuid> {
        if req.slug.trim().is_empty() {
            return Err(Error::InvalidInput("empty slug".to_string()));
        }

        let id = new_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO document (id, title, slug, content, status, created_at_utc, updated_at_utc)
             VALUES ($1, $2, $3, $4, $5, $6, $6)",
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.slug)
        .bind(&req.content)
        .bind(req.status.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(id)
    }

    async fn update_content(&self, id: Uuid, content: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE document SET content = $2, updated_at_utc = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(content)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::DocumentNotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // link_edge rows cascade via their foreign keys.
        let result = sqlx::query("DELETE FROM document WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::DocumentNotFound(id));
        }
        Ok(())
    }
}
