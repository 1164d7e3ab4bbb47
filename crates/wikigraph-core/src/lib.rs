//! # wikigraph-core
//!
//! Core types, traits, and abstractions for the wikigraph library.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the engine and database crates depend on: the document and link-edge
//! models, the repository traits, the shared error type, and configuration
//! defaults for the cross-reference linker.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use defaults::LinkerConfig;
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use uuid_utils::new_v7;
