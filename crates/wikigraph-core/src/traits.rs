//! Core traits for wikigraph abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// DOCUMENT STORE TRAITS
// =============================================================================

/// Request for creating a new document.
#[derive(Debug, Clone)]
pub struct CreateDocumentRequest {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: DocumentStatus,
}

/// Read/write surface of the document store consumed by the linking engine.
///
/// CRUD routing, authorization, and caching live outside this crate; the
/// linker only needs the corpus read plus enough write surface to drive
/// regeneration on content changes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Full corpus of (id, title, slug) triples for published documents.
    ///
    /// Re-read on every scan; there is no cached in-memory index.
    async fn list_titles(&self) -> Result<Vec<TitleEntry>>;

    /// Fetch a document by ID.
    async fn get(&self, id: Uuid) -> Result<Document>;

    /// Fetch a document by slug.
    async fn get_by_slug(&self, slug: &str) -> Result<Document>;

    /// Insert a new document.
    async fn insert(&self, req: CreateDocumentRequest) -> Result<Uuid>;

    /// Replace a document's content.
    async fn update_content(&self, id: Uuid, content: &str) -> Result<()>;

    /// Delete a document. Link edges touching it are cascaded away.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// LINK EDGE REPOSITORY TRAITS
// =============================================================================

/// Repository for the persisted link graph.
///
/// Uniqueness invariant: the composite key (from, to, keyword) is never
/// duplicated; relation changes are in-place updates.
#[async_trait]
pub trait LinkEdgeRepository: Send + Sync {
    /// Regenerate all auto edges from `from_document_id` out of a fresh match
    /// set: delete every existing auto edge from the document, then recreate
    /// one per match.
    ///
    /// Individual edge-creation failures (unique race, concurrently deleted
    /// target) are logged and skipped; the operation itself only fails on a
    /// non-recoverable store error. Returns the number of edges created.
    /// Edges with a non-auto relation are never touched.
    async fn upsert_auto_links(
        &self,
        from_document_id: Uuid,
        matches: &[KeywordMatch],
    ) -> Result<usize>;

    /// Idempotent update-or-create keyed by (from, to, keyword). Any relation
    /// type, including re-setting `auto`, is allowed via explicit action.
    async fn set_relation(
        &self,
        from_document_id: Uuid,
        to_document_id: Uuid,
        keyword: &str,
        relation: RelationType,
    ) -> Result<Uuid>;

    /// Delete a single edge by ID.
    async fn delete_edge(&self, edge_id: Uuid) -> Result<()>;

    /// Delete all auto-origin edges from a document (regeneration step).
    async fn delete_auto_from(&self, document_id: Uuid) -> Result<u64>;

    /// Delete every edge touching a document (document-deletion cascade).
    async fn delete_all_for(&self, document_id: Uuid) -> Result<u64>;

    /// Outgoing edges from a document.
    async fn get_outgoing(&self, document_id: Uuid) -> Result<Vec<LinkEdge>>;

    /// Incoming edges (backlinks) to a document.
    async fn get_incoming(&self, document_id: Uuid) -> Result<Vec<LinkEdge>>;

    /// Edges of one relation type, for the graph-visualization consumer.
    async fn list_by_relation(
        &self,
        relation: RelationType,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LinkEdge>>;

    /// Total edge count.
    async fn count(&self) -> Result<i64>;
}
