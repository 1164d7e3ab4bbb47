//! Title annotation: the simplified path for short strings.
//!
//! When a list of documents is rendered, each title may itself mention other
//! documents. Titles are plain text with no pre-existing markup, so the
//! inside-markup checks are skipped; the render must always produce
//! something, so any engine failure falls back to the original title.

use tracing::warn;
use uuid::Uuid;

use wikigraph_core::{LinkerConfig, Result, TitleEntry};

use crate::annotator::{annotate, MarkupMode};
use crate::matcher::find_matches;

/// Annotate a document title with links to other documents it mentions.
///
/// Runs the matcher with the containing document excluded, then plain-text
/// annotation. On any failure the original title is returned unchanged —
/// an unlinked title beats a failed render.
pub fn annotate_title(
    title: &str,
    corpus: &[TitleEntry],
    self_id: Option<Uuid>,
    config: &LinkerConfig,
) -> String {
    match try_annotate_title(title, corpus, self_id, config) {
        Ok(annotated) => annotated,
        Err(e) => {
            warn!(
                subsystem = "engine",
                component = "title",
                op = "annotate_title",
                error = %e,
                "Title annotation failed, returning original"
            );
            title.to_string()
        }
    }
}

fn try_annotate_title(
    title: &str,
    corpus: &[TitleEntry],
    self_id: Option<Uuid>,
    config: &LinkerConfig,
) -> Result<String> {
    let matches = find_matches(title, corpus, self_id, config)?;
    Ok(annotate(title, &matches, config, MarkupMode::Plain))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(seed: u128, title: &str, slug: &str) -> TitleEntry {
        TitleEntry::new(Uuid::from_u128(seed), title, slug)
    }

    #[test]
    fn test_title_mentioning_another_document() {
        let corpus = vec![
            entry(1, "Docker", "docker"),
            entry(2, "Docker Compose Guide", "docker-compose-guide"),
        ];
        let out = annotate_title(
            "Docker Compose Guide",
            &corpus,
            Some(Uuid::from_u128(2)),
            &LinkerConfig::default(),
        );
        assert_eq!(
            out,
            "<a href=\"/wiki/docker\" class=\"auto-link\">Docker</a> Compose Guide"
        );
    }

    #[test]
    fn test_self_reference_suppressed() {
        let corpus = vec![entry(1, "Docker", "docker")];
        let out = annotate_title(
            "Docker",
            &corpus,
            Some(Uuid::from_u128(1)),
            &LinkerConfig::default(),
        );
        assert_eq!(out, "Docker");
    }

    #[test]
    fn test_title_with_no_mentions_unchanged() {
        let corpus = vec![entry(1, "Docker", "docker")];
        let out = annotate_title(
            "Intro to Kubernetes",
            &corpus,
            None,
            &LinkerConfig::default(),
        );
        assert_eq!(out, "Intro to Kubernetes");
    }

    #[test]
    fn test_empty_corpus_passthrough() {
        let out = annotate_title("Anything", &[], None, &LinkerConfig::default());
        assert_eq!(out, "Anything");
    }
}
