//! Size-bounded text chunking that never splits inside a paragraph.
//!
//! Chapter bodies are chunked before being sent to a translation API with
//! a per-request character budget. Paragraphs are the atomic unit: a
//! paragraph longer than the budget stays whole and the chunk simply runs
//! over.

use once_cell::sync::Lazy;
use regex::Regex;

/// Blank-line paragraph boundary.
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern should compile"));

/// Separator re-appended to every emitted paragraph.
const PARAGRAPH_SEP: &str = "\n\n";

/// Split text into chunks of at most `max_chars` characters, greedily
/// packing whole paragraphs.
///
/// Each paragraph is re-emitted with a trailing blank line, so joining the
/// chunks reconstructs the paragraph-normalized input. A single paragraph
/// exceeding the budget becomes its own oversized chunk rather than being
/// split mid-paragraph. Empty input yields one empty chunk.
pub fn split_into_parts(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    // The budget is counted in characters, not bytes; CJK text would
    // otherwise overflow chunks three times too early.
    let mut current_chars = 0;

    for paragraph in PARAGRAPH_BREAK
        .split(text)
        .filter(|p| !p.trim().is_empty())
    {
        let paragraph_chars = paragraph.chars().count();
        let needed = paragraph_chars + PARAGRAPH_SEP.len();
        if !current.is_empty() && current_chars + needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if needed > max_chars {
            log::warn!(
                "paragraph of {paragraph_chars} chars exceeds chunk budget of {max_chars}, keeping it whole"
            );
        }
        current.push_str(paragraph);
        current.push_str(PARAGRAPH_SEP);
        current_chars += needed;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    if chunks.is_empty() {
        chunks.push(String::new());
    }
    chunks
}
