//! # wikigraph-engine
//!
//! The keyword cross-reference linking engine.
//!
//! This crate is pure, synchronous, CPU-bound string processing over the
//! types defined in `wikigraph-core`:
//!
//! - [`matcher`] scans arbitrary text against the full corpus of document
//!   titles and produces boundary-correct [`wikigraph_core::KeywordMatch`]es,
//!   honoring Unicode word-boundary rules for mixed Latin + CJK content.
//! - [`annotator`] rewrites rendered markup (or raw text) to wrap matched
//!   spans in anchor tags without double-linking or breaking existing markup.
//! - [`title`] is the simplified annotation path for short strings (document
//!   titles shown in lists).
//!
//! The corpus is passed in explicitly on every call; there is no hidden
//! global index and no shared mutable state across invocations.

pub mod annotator;
pub mod matcher;
pub mod script;
pub mod title;

pub use annotator::{annotate_html, annotate_text};
pub use matcher::find_matches;
pub use script::has_wide_script;
pub use title::annotate_title;
