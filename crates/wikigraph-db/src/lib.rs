//! # wikigraph-db
//!
//! PostgreSQL persistence layer for wikigraph.
//!
//! This crate provides:
//! - Connection pool management
//! - The link-edge repository (the persisted link graph)
//! - The document store read/write surface the linker consumes
//! - The auto-link regeneration pipeline run on document writes and reads
//!
//! ## Example
//!
//! ```rust,ignore
//! use wikigraph_db::{create_pool, AutoLinker, PgDocumentStore, PgLinkEdgeRepository};
//! use wikigraph_core::LinkerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool("postgres://localhost/wikigraph").await?;
//!     let linker = AutoLinker::new(
//!         PgDocumentStore::new(pool.clone()),
//!         PgLinkEdgeRepository::new(pool),
//!         LinkerConfig::from_env(),
//!     );
//!
//!     let doc = linker.store().get_by_slug("docker").await?;
//!     let created = linker.refresh(&doc).await?;
//!     println!("regenerated {} auto links", created);
//!     Ok(())
//! }
//! ```

pub mod autolink;
pub mod documents;
pub mod edges;
pub mod pool;

pub use autolink::{with_retry, AutoLinker};
pub use documents::PgDocumentStore;
pub use edges::PgLinkEdgeRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};

// Re-export core types
pub use wikigraph_core::*;
