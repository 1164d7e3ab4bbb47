//! Link-edge repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row, Transaction};
use tracing::{debug, warn};
use uuid::Uuid;

use wikigraph_core::{
    new_v7, Error, KeywordMatch, LinkEdge, LinkEdgeRepository, RelationType, Result,
};

/// PostgreSQL implementation of LinkEdgeRepository.
///
/// The composite identity (from, to, keyword) is guarded twice: by the
/// `INSERT ... WHERE NOT EXISTS` form here and by a unique index in the
/// schema, so a concurrent regeneration racing this one cannot duplicate a
/// triple.
pub struct PgLinkEdgeRepository {
    pool: Pool<Postgres>,
}

impl PgLinkEdgeRepository {
    /// Create a new PgLinkEdgeRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a single edge unless its identity triple already exists.
    ///
    /// Returns the id the row would carry; when the triple already existed
    /// no row is written and the existing relation is left alone.
    async fn create_edge(
        &self,
        from_document_id: Uuid,
        to_document_id: Uuid,
        keyword: &str,
        relation: RelationType,
    ) -> Result<Uuid> {
        let edge_id = new_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO link_edge (id, from_document_id, to_document_id, keyword, relation, created_at_utc)
             SELECT $1, $2, $3, $4, $5, $6
             WHERE NOT EXISTS (
                 SELECT 1 FROM link_edge
                 WHERE from_document_id = $2 AND to_document_id = $3 AND keyword = $4
             )",
        )
        .bind(edge_id)
        .bind(from_document_id)
        .bind(to_document_id)
        .bind(keyword)
        .bind(relation.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(edge_id)
    }

    fn map_edge(row: &sqlx::postgres::PgRow) -> Result<LinkEdge> {
        let relation: String = row.get("relation");
        let relation = RelationType::from_str_loose(&relation)
            .ok_or_else(|| Error::Internal(format!("Unknown relation type: {relation}")))?;
        Ok(LinkEdge {
            id: row.get("id"),
            from_document_id: row.get("from_document_id"),
            to_document_id: row.get("to_document_id"),
            keyword: row.get("keyword"),
            relation,
            created_at_utc: row.get("created_at_utc"),
        })
    }
}

#[async_trait]
impl LinkEdgeRepository for PgLinkEdgeRepository {
    async fn upsert_auto_links(
        &self,
        from_document_id: Uuid,
        matches: &[KeywordMatch],
    ) -> Result<usize> {
        let deleted = self.delete_auto_from(from_document_id).await?;

        let mut created = 0usize;
        for m in matches {
            // Best effort per edge: a unique-constraint race or a target
            // deleted between scan and write loses one auto link, which the
            // next content edit recovers.
            match self
                .create_edge(from_document_id, m.document_id, &m.keyword, RelationType::Auto)
                .await
            {
                Ok(_) => created += 1,
                Err(e) => {
                    warn!(
                        subsystem = "db",
                        component = "edges",
                        op = "upsert_auto_links",
                        document_id = %from_document_id,
                        to_document_id = %m.document_id,
                        keyword = %m.keyword,
                        error = %e,
                        "Skipping auto edge that failed to persist"
                    );
                }
            }
        }

        debug!(
            subsystem = "db",
            component = "edges",
            op = "upsert_auto_links",
            document_id = %from_document_id,
            deleted_count = deleted,
            edge_count = created,
            "Regenerated auto edges"
        );
        Ok(created)
    }

    async fn set_relation(
        &self,
        from_document_id: Uuid,
        to_document_id: Uuid,
        keyword: &str,
        relation: RelationType,
    ) -> Result<Uuid> {
        let now = Utc::now();

        let row = sqlx::query(
            "INSERT INTO link_edge (id, from_document_id, to_document_id, keyword, relation, created_at_utc)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (from_document_id, to_document_id, keyword)
             DO UPDATE SET relation = EXCLUDED.relation
             RETURNING id",
        )
        .bind(new_v7())
        .bind(from_document_id)
        .bind(to_document_id)
        .bind(keyword)
        .bind(relation.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.get("id"))
    }

    async fn delete_edge(&self, edge_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM link_edge WHERE id = $1")
            .bind(edge_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("link edge {edge_id}")));
        }
        Ok(())
    }

    async fn delete_auto_from(&self, document_id: Uuid) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM link_edge WHERE from_document_id = $1 AND relation = 'auto'")
                .bind(document_id)
                .execute(&self.pool)
                .await
                .map_err(Error::Database)?;
        Ok(result.rows_affected())
    }

    async fn delete_all_for(&self, document_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM link_edge WHERE from_document_id = $1 OR to_document_id = $1",
        )
        .bind(document_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(result.rows_affected())
    }

    async fn get_outgoing(&self, document_id: Uuid) -> Result<Vec<LinkEdge>> {
        let rows = sqlx::query(
            "SELECT id, from_document_id, to_document_id, keyword, relation, created_at_utc
             FROM link_edge
             WHERE from_document_id = $1
             ORDER BY created_at_utc DESC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(Self::map_edge).collect()
    }

    async fn get_incoming(&self, document_id: Uuid) -> Result<Vec<LinkEdge>> {
        let rows = sqlx::query(
            "SELECT id, from_document_id, to_document_id, keyword, relation, created_at_utc
             FROM link_edge
             WHERE to_document_id = $1
             ORDER BY created_at_utc DESC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(Self::map_edge).collect()
    }

    async fn list_by_relation(
        &self,
        relation: RelationType,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LinkEdge>> {
        let rows = sqlx::query(
            "SELECT id, from_document_id, to_document_id, keyword, relation, created_at_utc
             FROM link_edge
             WHERE relation = $1
             ORDER BY created_at_utc DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(relation.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(Self::map_edge).collect()
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM link_edge")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.get("count"))
    }
}

/// Transaction-aware variants for write paths that batch the regeneration
/// with other document-write statements.
impl PgLinkEdgeRepository {
    /// Create an edge within an existing transaction.
    pub async fn create_edge_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        from_document_id: Uuid,
        to_document_id: Uuid,
        keyword: &str,
        relation: RelationType,
    ) -> Result<Uuid> {
        let edge_id = new_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO link_edge (id, from_document_id, to_document_id, keyword, relation, created_at_utc)
             SELECT $1, $2, $3, $4, $5, $6
             WHERE NOT EXISTS (
                 SELECT 1 FROM link_edge
                 WHERE from_document_id = $2 AND to_document_id = $3 AND keyword = $4
             )",
        )
        .bind(edge_id)
        .bind(from_document_id)
        .bind(to_document_id)
        .bind(keyword)
        .bind(relation.as_str())
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;

        Ok(edge_id)
    }

    /// Delete auto edges from a document within an existing transaction.
    pub async fn delete_auto_from_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        document_id: Uuid,
    ) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM link_edge WHERE from_document_id = $1 AND relation = 'auto'")
                .bind(document_id)
                .execute(&mut **tx)
                .await
                .map_err(Error::Database)?;
        Ok(result.rows_affected())
    }

    /// Get outgoing edges within an existing transaction.
    pub async fn get_outgoing_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        document_id: Uuid,
    ) -> Result<Vec<LinkEdge>> {
        let rows = sqlx::query(
            "SELECT id, from_document_id, to_document_id, keyword, relation, created_at_utc
             FROM link_edge
             WHERE from_document_id = $1
             ORDER BY created_at_utc DESC",
        )
        .bind(document_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(Self::map_edge).collect()
    }
}
