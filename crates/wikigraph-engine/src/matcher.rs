//! Title matching against the document corpus.
//!
//! One boundary-aware regex is built per corpus title per scan. That is
//! O(corpus × text) work and an accepted ceiling of the design: the corpus is
//! re-read per invocation and there is no persistent multi-pattern automaton.

use std::collections::HashSet;

use regex::Regex;
use tracing::{trace, warn};
use uuid::Uuid;

use wikigraph_core::{KeywordMatch, LinkerConfig, Result, TitleEntry};

use crate::script::has_wide_script;

/// Build the boundary-aware search pattern for a single title.
///
/// Titles containing CJK characters reject only an immediately preceding
/// letter/digit (a larger token) and keep the trailing boundary permissive,
/// so "인덱스" still matches inside "인덱스임". Pure Latin/digit titles get
/// word-boundary semantics on both sides, with the boundary dropped next to a
/// leading/trailing symbol ("C++" has no word boundary after '+').
///
/// All patterns match case-insensitively; the matched substring keeps the
/// source text's casing.
pub(crate) fn keyword_pattern(keyword: &str) -> std::result::Result<Regex, regex::Error> {
    let escaped = regex::escape(keyword);
    let pattern = if has_wide_script(keyword) {
        format!(r"(?i)(?:^|[^\p{{L}}\p{{N}}_])({escaped})")
    } else {
        let lead = if keyword
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            r"\b"
        } else {
            ""
        };
        let trail = if keyword
            .chars()
            .last()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            r"\b"
        } else {
            ""
        };
        format!(r"(?i){lead}({escaped}){trail}")
    };
    Regex::new(&pattern)
}

/// Scan `text` for occurrences of corpus titles.
///
/// Returns one [`KeywordMatch`] per (title, document) pair — only the first
/// occurrence of a repeated title is retained. Matches are deduplicated by
/// the case-insensitive (keyword, document) key, keeping the earlier
/// discovery, then sorted descending by keyword length and resolved for span
/// overlap: a shorter title never wins a span also covered by a longer one
/// ("Redux" inside "Redux Toolkit" produces no match of its own). Equal
/// lengths are ordered by document id, keeping the result stable across
/// corpus iteration orders.
///
/// `exclude_document_id` suppresses self-references; callers scanning a
/// document's own content pass that document's id.
pub fn find_matches(
    text: &str,
    corpus: &[TitleEntry],
    exclude_document_id: Option<Uuid>,
    config: &LinkerConfig,
) -> Result<Vec<KeywordMatch>> {
    if text.is_empty() || corpus.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen: HashSet<(String, Uuid)> = HashSet::new();
    let mut matches: Vec<KeywordMatch> = Vec::new();

    for entry in corpus.iter().take(config.max_corpus_titles) {
        if Some(entry.id) == exclude_document_id {
            continue;
        }
        let title = entry.title.trim();
        if title.chars().count() < config.min_title_len {
            continue;
        }

        let re = match keyword_pattern(title) {
            Ok(re) => re,
            Err(e) => {
                warn!(
                    subsystem = "engine",
                    component = "matcher",
                    title = %entry.title,
                    error = %e,
                    "Skipping title with unusable pattern"
                );
                continue;
            }
        };

        // First occurrence only: repeated mentions of the same title within
        // one text never produce duplicate matches.
        let Some(caps) = re.captures(text) else {
            continue;
        };
        let Some(m) = caps.get(1) else {
            continue;
        };

        let keyword = &text[m.start()..m.end()];
        let key = (keyword.to_lowercase(), entry.id);
        if !seen.insert(key) {
            continue;
        }

        trace!(
            subsystem = "engine",
            component = "matcher",
            title = %entry.title,
            start = m.start(),
            "Title matched"
        );

        matches.push(KeywordMatch {
            keyword: keyword.to_string(),
            document_id: entry.id,
            title: entry.title.clone(),
            slug: entry.slug.clone(),
            start: m.start(),
            end: m.end(),
        });
    }

    matches.sort_by(|a, b| {
        b.keyword
            .chars()
            .count()
            .cmp(&a.keyword.chars().count())
            .then_with(|| a.document_id.cmp(&b.document_id))
            .then_with(|| a.keyword.cmp(&b.keyword))
    });

    // Longest-first span resolution. The annotator repeats this bookkeeping
    // against the rendered markup, where occurrences can land differently.
    let mut retained: Vec<KeywordMatch> = Vec::new();
    for m in matches {
        let overlaps = retained.iter().any(|r| m.start < r.end && m.end > r.start);
        if !overlaps {
            retained.push(m);
        }
    }

    Ok(retained)
}
