//! Configuration defaults for the cross-reference linker.
//!
//! All values can be overridden through environment variables, with invalid
//! values logged at WARN and replaced by the default.

/// Default CSS class applied to auto-inserted anchors.
pub const DEFAULT_LINK_CLASS: &str = "auto-link";

/// Default minimum title length (in chars) eligible as a match source.
/// One-character titles link almost every document to almost every other.
pub const DEFAULT_MIN_TITLE_LEN: usize = 2;

/// Default cap on auto edges regenerated per document.
pub const DEFAULT_MAX_AUTO_EDGES: usize = 200;

/// Default cap on corpus entries considered per scan.
pub const DEFAULT_MAX_CORPUS_TITLES: usize = 50_000;

/// Runtime configuration for the matcher/annotator/link pipeline.
#[derive(Debug, Clone)]
pub struct LinkerConfig {
    /// CSS class stamped on inserted anchor tags.
    pub link_class: String,
    /// Titles shorter than this many chars are skipped as match sources.
    pub min_title_len: usize,
    /// Hard cap on auto edges created per regeneration pass.
    pub max_auto_edges: usize,
    /// Hard cap on corpus entries scanned per pass.
    pub max_corpus_titles: usize,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            link_class: DEFAULT_LINK_CLASS.to_string(),
            min_title_len: DEFAULT_MIN_TITLE_LEN,
            max_auto_edges: DEFAULT_MAX_AUTO_EDGES,
            max_corpus_titles: DEFAULT_MAX_CORPUS_TITLES,
        }
    }
}

impl LinkerConfig {
    /// Load configuration from environment variables with fallback to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("LINKER_LINK_CLASS") {
            if !val.trim().is_empty() {
                config.link_class = val;
            }
        }

        if let Ok(val) = std::env::var("LINKER_MIN_TITLE_LEN") {
            if let Ok(n) = val.parse::<usize>() {
                config.min_title_len = n.clamp(1, 64);
            } else {
                tracing::warn!(value = %val, "Invalid LINKER_MIN_TITLE_LEN, using default");
            }
        }

        if let Ok(val) = std::env::var("LINKER_MAX_AUTO_EDGES") {
            if let Ok(n) = val.parse::<usize>() {
                config.max_auto_edges = n.max(1);
            } else {
                tracing::warn!(value = %val, "Invalid LINKER_MAX_AUTO_EDGES, using default");
            }
        }

        if let Ok(val) = std::env::var("LINKER_MAX_CORPUS_TITLES") {
            if let Ok(n) = val.parse::<usize>() {
                config.max_corpus_titles = n.max(1);
            } else {
                tracing::warn!(value = %val, "Invalid LINKER_MAX_CORPUS_TITLES, using default");
            }
        }

        config
    }
}
