//! Heading classification: is this line the start of a new chapter?
//!
//! A single precompiled regex recognizes the heading families (chapter,
//! part, section, book, bare-numbered) and the numeral kinds (Arabic,
//! Roman, word numbers). Classification produces a tagged [`HeadingMatch`]
//! rather than raw capture groups.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::numerals::parse_num_loose;

/// Longest-first unit and teen words, so regex alternation prefers
/// "fourteen" over "four".
const UNIT_WORDS: &str = "seventeen|thirteen|fourteen|fifteen|sixteen|eighteen|nineteen|\
                          eleven|twelve|seven|three|eight|four|five|nine|zero|one|two|six|ten";

/// Tens words for compound word numbers ("twenty-one", "ninety five").
const TENS_WORDS: &str = "twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety";

/// Word-number sub-pattern: a tens word with optional unit, a bare unit or
/// teen, optionally scaled by "hundred".
fn word_number_pattern() -> String {
    format!(
        r"(?:{UNIT_WORDS})\s+hundred(?:\s+(?:(?:{TENS_WORDS})(?:[\s-](?:{UNIT_WORDS}))?|(?:{UNIT_WORDS})))?|(?:{TENS_WORDS})(?:[\s-](?:{UNIT_WORDS}))?|(?:{UNIT_WORDS})"
    )
}

/// The heading recognizer.
///
/// Anchored at line start after a run of non-word characters (markdown
/// bullets, dashes, quote marks, whitespace). Case-insensitive. Exactly one
/// numeral group is populated per match; everything after the numeral lands
/// in `rest`.
pub static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    let word = word_number_pattern();
    let source = format!(
        r"(?i)^(?P<lead>[\W_]*?)(?:(?:chapter|chap|ch)[\s.:\-]+(?:(?P<num_d>\d+[a-z]?)|(?P<num_r>[ivxlcdm]+)\b|(?P<num_w>{word})\b)|part[\s.:\-]+(?:(?P<part_d>\d+)|(?P<part_r>[ivxlcdm]+)\b|(?P<part_w>{word})\b)|section[\s.:\-]+(?:(?P<sec_d>\d+)|(?P<sec_r>[ivxlcdm]+)\b|(?P<sec_w>{word})\b)|book[\s.:\-]+(?:(?P<book_d>\d+)|(?P<book_r>[ivxlcdm]+)\b|(?P<book_w>{word})\b)|§\s*(?P<mark_d>\d+)|(?P<hash_d>\d+)[.):\s\-])(?P<rest>.*)$"
    );
    Regex::new(&source).expect("heading pattern should compile")
});

/// Longest run of decoration characters (`#*->|~/§[({`, quotes,
/// whitespace) allowed before "chapter".
const MAX_DECORATION: usize = 6;

/// Quote characters counted when looking for unmatched opening quotes.
const QUOTE_CHARS: &[char] = &['"', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}'];

/// Which heading family matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    Chapter,
    Part,
    Section,
    Book,
    /// Bare leading number ("12. The Storm") or a `§` marker.
    Hash,
}

/// The numeral kind captured from a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Numeral {
    Arabic(String),
    Roman(String),
    Word(String),
}

impl Numeral {
    /// The captured numeral text, whatever its kind.
    pub fn text(&self) -> &str {
        match self {
            Numeral::Arabic(s) | Numeral::Roman(s) | Numeral::Word(s) => s,
        }
    }
}

/// A classified heading line.
#[derive(Debug, Clone)]
pub struct HeadingMatch {
    /// The line exactly as it appeared.
    pub raw_line: String,
    pub kind: HeadingKind,
    pub numeral: Numeral,
    /// Everything after the numeral, punctuation included.
    pub trailing_text: String,
    /// Count of skipped non-word characters before the heading keyword.
    pub leading_offset: usize,
}

impl HeadingMatch {
    /// Parse the captured numeral with the permissive number parser.
    pub fn number(&self) -> Option<i64> {
        parse_num_loose(self.numeral.text())
    }
}

/// Classify a line as a heading, extracting its numeral and trailing text.
///
/// Returns `None` for ordinary body text. Callers segmenting chapter text
/// should additionally apply [`is_valid_chapter_line`] to lines containing
/// the word "chapter".
pub fn classify_line(line: &str) -> Option<HeadingMatch> {
    let caps = HEADING_RE.captures(line)?;

    let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
    let pick = |d: &str, r: &str, w: &str| -> Option<Numeral> {
        group(d)
            .map(Numeral::Arabic)
            .or_else(|| group(r).map(Numeral::Roman))
            .or_else(|| group(w).map(Numeral::Word))
    };

    let (kind, numeral) = if let Some(n) = pick("num_d", "num_r", "num_w") {
        (HeadingKind::Chapter, n)
    } else if let Some(n) = pick("part_d", "part_r", "part_w") {
        (HeadingKind::Part, n)
    } else if let Some(n) = pick("sec_d", "sec_r", "sec_w") {
        (HeadingKind::Section, n)
    } else if let Some(n) = pick("book_d", "book_r", "book_w") {
        (HeadingKind::Book, n)
    } else if let Some(n) = group("mark_d").or_else(|| group("hash_d")) {
        (HeadingKind::Hash, Numeral::Arabic(n))
    } else {
        return None;
    };

    Some(HeadingMatch {
        raw_line: line.to_string(),
        kind,
        numeral,
        trailing_text: group("rest").unwrap_or_default(),
        leading_offset: caps
            .name("lead")
            .map(|m| m.as_str().chars().count())
            .unwrap_or(0),
    })
}

/// Filter for lines containing the literal word "chapter".
///
/// Such a line is a valid heading only when "chapter" begins the line after
/// a bounded run of decoration characters, with no unmatched opening quote
/// before it. Quoted speech and mid-sentence mentions of "chapter" are body
/// text even though the heading regex might match them. Lines without the
/// word "chapter" pass unfiltered.
pub fn is_valid_chapter_line(line: &str) -> bool {
    let trimmed = line.trim();
    let Some(pos) = find_case_insensitive(trimmed, "chapter") else {
        return true;
    };

    let prefix: Vec<char> = trimmed[..pos].chars().collect();
    if prefix.len() > MAX_DECORATION {
        return false;
    }
    if prefix.iter().any(|c| c.is_alphanumeric()) {
        return false;
    }

    // An odd number of quote characters before "chapter" means it sits
    // inside an open quotation.
    let quotes = prefix.iter().filter(|c| QUOTE_CHARS.contains(c)).count();
    quotes % 2 == 0
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
fn find_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().find_map(|(i, _)| {
        haystack[i..]
            .get(..needle.len())
            .filter(|s| s.eq_ignore_ascii_case(needle))
            .map(|_| i)
    })
}
