//! Unicode script detection for boundary-rule selection.
//!
//! Latin titles get standard word-boundary semantics on both sides of a
//! match. Titles containing "wide-script" (CJK) characters cannot rely on
//! word boundaries — CJK text has no inter-word whitespace and agglutinative
//! suffixes attach directly to stems — so they get a permissive trailing
//! boundary and only a leading run-on check.

use unicode_script::{Script, UnicodeScript};

/// Returns true if the string contains any CJK-range character.
///
/// Covers Han (Chinese), Hiragana/Katakana (Japanese), and Hangul (Korean).
///
/// # Examples
///
/// ```
/// use wikigraph_engine::script::has_wide_script;
///
/// assert!(has_wide_script("인덱스"));
/// assert!(has_wide_script("Rust 入門"));
/// assert!(!has_wide_script("Rust"));
/// ```
pub fn has_wide_script(s: &str) -> bool {
    s.chars().any(|ch| {
        matches!(
            ch.script(),
            Script::Han | Script::Hiragana | Script::Katakana | Script::Hangul
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_latin() {
        assert!(!has_wide_script("Hello world"));
        assert!(!has_wide_script("React Hooks"));
    }

    #[test]
    fn test_pure_hangul() {
        assert!(has_wide_script("인덱스"));
        assert!(has_wide_script("안녕하세요"));
    }

    #[test]
    fn test_pure_han() {
        assert!(has_wide_script("你好世界"));
    }

    #[test]
    fn test_japanese_kana() {
        assert!(has_wide_script("こんにちは"));
        assert!(has_wide_script("カタカナ"));
    }

    #[test]
    fn test_mixed_latin_cjk() {
        assert!(has_wide_script("Docker 컨테이너"));
        assert!(has_wide_script("Search for 東京"));
    }

    #[test]
    fn test_empty() {
        assert!(!has_wide_script(""));
    }

    #[test]
    fn test_cyrillic_is_not_wide() {
        assert!(!has_wide_script("Привет мир"));
    }
}
