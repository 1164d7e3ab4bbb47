//! Structured logging schema and field name constants for wikigraph.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data (per-title scans) |

/// Subsystem originating the log event.
/// Values: "engine", "db"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "matcher", "annotator", "edges", "pool", "autolink"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "find_matches", "annotate", "upsert_auto_links", "refresh"
pub const OPERATION: &str = "op";

/// Document UUID being operated on.
pub const DOCUMENT_ID: &str = "document_id";

/// Number of keyword matches produced by a scan.
pub const MATCH_COUNT: &str = "match_count";

/// Number of link edges created or deleted.
pub const EDGE_COUNT: &str = "edge_count";

/// Number of corpus titles considered in a scan.
pub const CORPUS_SIZE: &str = "corpus_size";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";
