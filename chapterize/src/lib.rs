//! Chapter segmentation for translated novel text.
//!
//! Takes a long, loosely structured text and:
//! - recognizes heterogeneous chapter headings (Arabic, Roman, and word
//!   numerals; chapter/part/section/book keywords; bare-numbered lines),
//! - partitions the text into (title, body) segments with front-matter,
//!   duplicate-heading, and sub-part handling,
//! - diagnoses anomalies in the chapter-number sequence,
//! - chunks arbitrary text to a character budget without breaking
//!   paragraphs.

pub mod chunker;
pub mod config;
pub mod error;
pub mod heading;
pub mod numerals;
pub mod parts;
pub mod segmenter;
pub mod sequence;

pub use chunker::split_into_parts;
pub use config::SplitOptions;
pub use error::{ChapterizeError, Result};
pub use heading::{classify_line, is_valid_chapter_line, HeadingKind, HeadingMatch, Numeral};
pub use numerals::{parse_num, parse_num_loose, roman_to_int};
pub use parts::has_part_notation;
pub use segmenter::{
    split_text, split_text_db, BulkSegmenter, ChapterSegment, ChapterSplitter,
    CONTENT_TITLE, FRONT_MATTER_TITLE,
};
pub use sequence::detect_issues;
