//! Markup annotation: wrapping matched spans in anchor tags.
//!
//! Replacement never mutates the string while scanning it. All candidate
//! spans are computed against the immutable original input, filtered through
//! the claimed-interval set, and applied strictly back-to-front so earlier
//! insertions cannot shift later offsets.

use regex::Regex;
use tracing::warn;

use wikigraph_core::{KeywordMatch, LinkerConfig};

use crate::matcher::keyword_pattern;

/// How much markup structure the input is assumed to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkupMode {
    /// Rendered HTML: only text strictly between `>` and `<` is eligible,
    /// and existing anchors / unresolved markdown links are respected.
    Html,
    /// Plain short string with no pre-existing markup (title rendering).
    Plain,
}

/// Annotate rendered HTML with links for the given matches.
///
/// Matches are expected in the matcher's order (longest keyword first); the
/// claimed-span bookkeeping here is what makes the longest match win when a
/// shorter title covers part of the same span.
///
/// Idempotent for a fixed match list: every span linked by one pass sits
/// inside an anchor on the next pass and is skipped by the no-double-linking
/// rule.
pub fn annotate_html(html: &str, matches: &[KeywordMatch], config: &LinkerConfig) -> String {
    annotate(html, matches, config, MarkupMode::Html)
}

/// Annotate raw text (a text-node stream, pre-markdown-render) with links.
///
/// Newlines are first converted to explicit `<br>` markers; after that the
/// input is treated like markup so the markers themselves are never matched
/// into.
pub fn annotate_text(text: &str, matches: &[KeywordMatch], config: &LinkerConfig) -> String {
    let converted = text.replace('\n', "<br>");
    annotate(&converted, matches, config, MarkupMode::Html)
}

pub(crate) fn annotate(
    input: &str,
    matches: &[KeywordMatch],
    config: &LinkerConfig,
    mode: MarkupMode,
) -> String {
    if input.is_empty() || matches.is_empty() {
        return input.to_string();
    }

    let runs = match mode {
        MarkupMode::Html => text_runs(input),
        MarkupMode::Plain => vec![(0, input.len())],
    };

    // Positions of anchor opens/closes, for the inside-anchor check.
    let (anchor_opens, anchor_closes) = if mode == MarkupMode::Html {
        anchor_positions(input)
    } else {
        (Vec::new(), Vec::new())
    };

    // (start, end, replacement) triples against the original string.
    let mut insertions: Vec<(usize, usize, String)> = Vec::new();
    let mut claimed: Vec<(usize, usize)> = Vec::new();

    for m in matches {
        let re = match keyword_pattern(&m.keyword) {
            Ok(re) => re,
            Err(e) => {
                warn!(
                    subsystem = "engine",
                    component = "annotator",
                    keyword = %m.keyword,
                    error = %e,
                    "Skipping keyword with unusable pattern"
                );
                continue;
            }
        };

        for caps in re.captures_iter(input) {
            let Some(g) = caps.get(1) else {
                continue;
            };
            let (start, end) = (g.start(), g.end());

            // Positions inside tags or existing links are not candidates;
            // keep searching for a later plain occurrence.
            if !inside_any_run(&runs, start, end) {
                continue;
            }
            if mode == MarkupMode::Html {
                if inside_anchor(&anchor_opens, &anchor_closes, start) {
                    continue;
                }
                if inside_markdown_link(input, start) {
                    continue;
                }
            }

            // A span already claimed by a longer match skips this match
            // outright: that is the longest-match-wins rule.
            if overlaps_claimed(&claimed, start, end) {
                break;
            }

            insertions.push((
                start,
                end,
                format!(
                    "<a href=\"/wiki/{}\" class=\"{}\">{}</a>",
                    m.slug,
                    config.link_class,
                    &input[start..end]
                ),
            ));
            claimed.push((start, end));
            break;
        }
    }

    // Back-to-front: each replacement's offsets stay valid relative to the
    // still-unmodified prefix.
    insertions.sort_by(|a, b| b.0.cmp(&a.0));
    let mut out = input.to_string();
    for (start, end, replacement) in insertions {
        out.replace_range(start..end, &replacement);
    }
    out
}

/// Maximal intervals of text lying outside `<...>` tags.
fn text_runs(input: &str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut in_tag = false;
    let mut run_start = 0usize;

    for (i, ch) in input.char_indices() {
        match ch {
            '<' if !in_tag => {
                if i > run_start {
                    runs.push((run_start, i));
                }
                in_tag = true;
            }
            '>' if in_tag => {
                in_tag = false;
                run_start = i + 1;
            }
            _ => {}
        }
    }
    if !in_tag && input.len() > run_start {
        runs.push((run_start, input.len()));
    }
    runs
}

fn inside_any_run(runs: &[(usize, usize)], start: usize, end: usize) -> bool {
    runs.iter().any(|&(a, b)| a <= start && end <= b)
}

/// Byte positions of `<a ...>` opens and `</a>` closes.
fn anchor_positions(input: &str) -> (Vec<usize>, Vec<usize>) {
    // Compiled per call; annotation runs once per render and the pattern is
    // trivial.
    let open_re = Regex::new(r"(?i)<a[\s>]").expect("static pattern");
    let opens = open_re.find_iter(input).map(|m| m.start()).collect();
    let closes = input.match_indices("</a>").map(|(i, _)| i).collect();
    (opens, closes)
}

/// True if `pos` lies between the most recent unmatched `<a` open tag and its
/// `</a>` close.
fn inside_anchor(opens: &[usize], closes: &[usize], pos: usize) -> bool {
    let last_open = opens.iter().rev().find(|&&p| p < pos);
    let last_close = closes.iter().rev().find(|&&p| p < pos);
    match (last_open, last_close) {
        (Some(o), Some(c)) => o > c,
        (Some(_), None) => true,
        _ => false,
    }
}

/// True if `pos` sits inside unresolved markdown link syntax: either the
/// `[...]` label of a link still awaiting its `](`, or the `](...` URL part
/// awaiting its `)`.
fn inside_markdown_link(input: &str, pos: usize) -> bool {
    let before = &input[..pos];
    if let Some(lb) = before.rfind('[') {
        if !before[lb..].contains(']') {
            return true;
        }
    }
    if let Some(op) = before.rfind("](") {
        if !before[op..].contains(')') {
            return true;
        }
    }
    false
}

fn overlaps_claimed(claimed: &[(usize, usize)], start: usize, end: usize) -> bool {
    claimed.iter().any(|&(a, b)| start < b && end > a)
}
