//! Core data models for wikigraph.
//!
//! `Document` and `LinkEdge` are the persisted entities; `TitleEntry` and
//! `KeywordMatch` are the ephemeral corpus/scan types that flow between the
//! matcher and the link repository without ever being stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// Moderation status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Published,
    Pending,
    Rejected,
}

impl DocumentStatus {
    /// Stable string form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Published => "published",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Rejected => "rejected",
        }
    }

    /// Parse from the stored string form.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s {
            "published" => Some(DocumentStatus::Published),
            "pending" => Some(DocumentStatus::Pending),
            "rejected" => Some(DocumentStatus::Rejected),
            _ => None,
        }
    }
}

/// A wiki document.
///
/// `title` doubles as the matchable keyword for cross-reference linking.
/// `slug` is unique; title uniqueness is not enforced structurally, but
/// duplicate titles degrade matching (ambiguous link target).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: DocumentStatus,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

/// One corpus entry: the (id, title, slug) triple the matcher scans against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleEntry {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

impl TitleEntry {
    pub fn new(id: Uuid, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            slug: slug.into(),
        }
    }
}

// =============================================================================
// MATCH TYPES
// =============================================================================

/// A single detected occurrence of a document title inside scanned text.
///
/// Ephemeral: produced by one scan pass, consumed to build link edges or to
/// drive the annotator, never persisted. `keyword` preserves the casing of
/// the matched substring in the *source text*, not the title's casing.
/// `start`/`end` are byte offsets into the scanned string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub document_id: Uuid,
    pub title: String,
    pub slug: String,
    pub start: usize,
    pub end: usize,
}

// =============================================================================
// LINK EDGE TYPES
// =============================================================================

/// Typed relation carried by a link edge.
///
/// The string spellings are a hard external contract: the graph-visualization
/// consumer filters edges on these exact values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "parent-child")]
    ParentChild,
    #[serde(rename = "related")]
    Related,
    #[serde(rename = "reference")]
    Reference,
}

impl RelationType {
    /// Stable string form used in the database and over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Auto => "auto",
            RelationType::ParentChild => "parent-child",
            RelationType::Related => "related",
            RelationType::Reference => "reference",
        }
    }

    /// Parse from the stored string form.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(RelationType::Auto),
            "parent-child" => Some(RelationType::ParentChild),
            "related" => Some(RelationType::Related),
            "reference" => Some(RelationType::Reference),
            _ => None,
        }
    }
}

/// A persisted, directed, typed relationship between two documents.
///
/// Composite identity is `(from_document_id, to_document_id, keyword)`; at
/// most one edge exists per triple. Changing the relation on an existing
/// triple is an update, not an insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkEdge {
    pub id: Uuid,
    pub from_document_id: Uuid,
    pub to_document_id: Uuid,
    /// The literal matched substring, case preserved from the source title.
    pub keyword: String,
    pub relation: RelationType,
    pub created_at_utc: DateTime<Utc>,
}
