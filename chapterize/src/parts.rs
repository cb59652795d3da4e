//! Detection of sub-part notation in chapter headings.
//!
//! A heading like "Chapter 12 (2 of 3)" is a continuation of chapter 12,
//! not a duplicate. The segmenter uses this to decide between folding a
//! repeated heading away and sub-numbering it.

use once_cell::sync::Lazy;
use regex::Regex;

/// Word numbers accepted after "part"/"pt".
const PART_WORDS: &str =
    "seventeen|thirteen|fourteen|fifteen|sixteen|eighteen|nineteen|eleven|twelve|\
     seven|three|eight|four|five|nine|zero|one|two|six|ten";

/// Ordered part-notation patterns. The first match wins; later patterns
/// are not evaluated.
static PART_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let sources = [
        // Simple fraction: "1/3"
        r"(?i)\d+\s*/\s*\d+".to_string(),
        // Bracketed fraction: "[1/3]"
        r"(?i)\[\s*\d+\s*/\s*\d+\s*\]".to_string(),
        // "(2 of 3)"
        r"(?i)\(\s*\d+\s+of\s+\d+\s*\)".to_string(),
        // "(2 out of 3)"
        r"(?i)\(\s*\d+\s+out\s+of\s+\d+\s*\)".to_string(),
        // "part 2", "pt. 2", "pt 2", "part two"
        format!(r"(?i)\bp(?:ar)?t\.?\s+(?:\d+|{PART_WORDS})\b"),
        // Trailing "- 2" at end of string
        r"(?i)-\s*\d+\s*$".to_string(),
        // "part II", "pt. iv"
        r"(?i)\bp(?:ar)?t\.?\s+[ivxlcdm]+\b".to_string(),
        // Trailing "- II" at end of string, preceded by whitespace
        r"(?i)\s-\s*[ivxlcdm]+\s*$".to_string(),
    ];
    sources
        .iter()
        .map(|s| Regex::new(s).expect("part-notation pattern should compile"))
        .collect()
});

/// Check whether a heading carries sub-part notation.
///
/// Returns `false` for `None`, empty, or whitespace-only input. Matching is
/// case-insensitive throughout.
pub fn has_part_notation(title: Option<&str>) -> bool {
    let title = match title {
        Some(t) if !t.trim().is_empty() => t,
        _ => return false,
    };
    PART_PATTERNS.iter().any(|p| p.is_match(title))
}
