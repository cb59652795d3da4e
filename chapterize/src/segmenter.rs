//! Chapter segmentation: partition a novel's text into (title, body)
//! segments plus the parsed chapter-number sequence.

use std::collections::{HashMap, HashSet};

use crate::config::SplitOptions;
use crate::error::Result;
use crate::heading::{classify_line, is_valid_chapter_line};
use crate::parts::has_part_notation;

/// Title given to text preceding the first recognized heading.
pub const FRONT_MATTER_TITLE: &str = "Front Matter";

/// Title given to the single segment produced when no headings are found
/// or heading detection is disabled.
pub const CONTENT_TITLE: &str = "Content";

/// One chapter: the heading line (possibly with a sub-part suffix), the
/// body up to the next heading, and the parsed number. Pseudo-chapters
/// ("Front Matter", "Content") carry no number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSegment {
    pub title: String,
    pub body: String,
    pub number: Option<i64>,
}

impl ChapterSegment {
    fn new(title: impl Into<String>, body: impl Into<String>, number: Option<i64>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            number,
        }
    }
}

/// Collaborator contract for the database-optimized large-file path.
///
/// Implementations must return the same shape as the in-memory splitter.
/// Any error is treated as a signal to fall back; it never reaches the
/// caller.
pub trait BulkSegmenter {
    fn split(&self, text: &str, detect_headings: bool)
        -> Result<(Vec<ChapterSegment>, Vec<i64>)>;
}

/// A heading in the middle of being assembled during the scan.
struct Building {
    title: String,
    number: Option<i64>,
    body: Vec<String>,
    heading_line: usize,
}

/// The chapter segmentation engine.
pub struct ChapterSplitter {
    options: SplitOptions,
    bulk: Option<Box<dyn BulkSegmenter>>,
}

impl ChapterSplitter {
    pub fn new(options: SplitOptions) -> Self {
        Self {
            options,
            bulk: None,
        }
    }

    /// Attach a large-file collaborator. It is only consulted when the
    /// input exceeds `bulk_threshold_lines`.
    pub fn with_bulk(mut self, bulk: Box<dyn BulkSegmenter>) -> Self {
        self.bulk = Some(bulk);
        self
    }

    /// Split text into chapters and a parallel sequence of parsed numbers.
    ///
    /// `force_no_db` bypasses the bulk collaborator even for large inputs.
    pub fn split_text(
        &self,
        text: &str,
        detect_headings: bool,
        force_no_db: bool,
    ) -> (Vec<ChapterSegment>, Vec<i64>) {
        if !force_no_db {
            if let Some(result) = self.try_bulk(text, detect_headings, None) {
                return result;
            }
        }
        self.split_in_memory(text, detect_headings)
    }

    /// Large-file entry point: attempt the bulk collaborator first, fall
    /// back to the in-memory scan on any failure. Failures are reported
    /// through `log_issue` (and the `log` facade), never returned.
    pub fn split_text_db(
        &self,
        text: &str,
        detect_headings: bool,
        log_issue: Option<&dyn Fn(&str)>,
    ) -> (Vec<ChapterSegment>, Vec<i64>) {
        if let Some(result) = self.try_bulk(text, detect_headings, log_issue) {
            return result;
        }
        self.split_in_memory(text, detect_headings)
    }

    fn try_bulk(
        &self,
        text: &str,
        detect_headings: bool,
        log_issue: Option<&dyn Fn(&str)>,
    ) -> Option<(Vec<ChapterSegment>, Vec<i64>)> {
        let bulk = self.bulk.as_ref()?;
        if text.lines().count() <= self.options.bulk_threshold_lines {
            return None;
        }
        match bulk.split(text, detect_headings) {
            Ok(result) => Some(result),
            Err(e) => {
                let message =
                    format!("bulk segmentation failed, falling back to in-memory split: {e}");
                log::warn!("{message}");
                if let Some(sink) = log_issue {
                    sink(&message);
                }
                None
            }
        }
    }

    /// The core line scan.
    fn split_in_memory(
        &self,
        text: &str,
        detect_headings: bool,
    ) -> (Vec<ChapterSegment>, Vec<i64>) {
        if !detect_headings {
            return (
                vec![ChapterSegment::new(CONTENT_TITLE, text, None)],
                Vec::new(),
            );
        }

        let mut front: Vec<&str> = Vec::new();
        let mut built: Vec<Building> = Vec::new();
        let mut current: Option<Building> = None;
        let mut sub_numbered: HashSet<i64> = HashSet::new();

        for (idx, line) in text.lines().enumerate() {
            let heading = classify_line(line).filter(|_| is_valid_chapter_line(line));
            let Some(h) = heading else {
                match current.as_mut() {
                    Some(cur) => cur.body.push(line.to_string()),
                    None => front.push(line),
                }
                continue;
            };
            let number = h.number();

            // Restated heading: same number right below the previous one
            // with nothing but blank lines in between folds into the body.
            if let Some(cur) = current.as_mut() {
                let within_window = idx - cur.heading_line <= self.options.duplicate_window;
                let blank_body = cur.body.iter().all(|l| l.trim().is_empty());
                if number.is_some() && number == cur.number && within_window && blank_body {
                    cur.body.push(line.to_string());
                    continue;
                }
            }

            // A recurring number with part notation is a genuine
            // continuation; mark it for sub-numbering.
            if let Some(n) = number {
                let seen_before = built.iter().any(|b| b.number == Some(n))
                    || current.as_ref().is_some_and(|c| c.number == Some(n));
                if seen_before && has_part_notation(Some(line)) {
                    sub_numbered.insert(n);
                }
            }

            if let Some(done) = current.take() {
                built.push(done);
            }
            current = Some(Building {
                title: line.to_string(),
                number,
                body: Vec::new(),
                heading_line: idx,
            });
        }
        if let Some(done) = current.take() {
            built.push(done);
        }

        if built.is_empty() {
            return (
                vec![ChapterSegment::new(CONTENT_TITLE, text.trim(), None)],
                Vec::new(),
            );
        }

        let mut segments = Vec::with_capacity(built.len() + 1);
        let mut sequence = Vec::with_capacity(built.len());

        if front.iter().any(|l| !l.trim().is_empty()) {
            segments.push(ChapterSegment::new(
                FRONT_MATTER_TITLE,
                front.join("\n"),
                None,
            ));
        }

        let mut occurrences: HashMap<i64, usize> = HashMap::new();
        for building in built {
            let mut title = building.title;
            if let Some(n) = building.number {
                if sub_numbered.contains(&n) {
                    let k = occurrences.entry(n).or_insert(0);
                    *k += 1;
                    title = format!("{title} (Part {k})");
                }
                // The same number repeats in the sequence on purpose when
                // sub-numbered; the validator explains it downstream.
                sequence.push(n);
            }
            segments.push(ChapterSegment::new(
                title,
                building.body.join("\n"),
                building.number,
            ));
        }

        (segments, sequence)
    }
}

/// Split with default options and no bulk collaborator.
pub fn split_text(
    text: &str,
    detect_headings: bool,
    force_no_db: bool,
) -> (Vec<ChapterSegment>, Vec<i64>) {
    ChapterSplitter::new(SplitOptions::default()).split_text(text, detect_headings, force_no_db)
}

/// Large-file entry point with default options. Without a configured
/// collaborator this is the in-memory path.
pub fn split_text_db(
    text: &str,
    detect_headings: bool,
    log_issue: Option<&dyn Fn(&str)>,
) -> (Vec<ChapterSegment>, Vec<i64>) {
    ChapterSplitter::new(SplitOptions::default()).split_text_db(text, detect_headings, log_issue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChapterizeError;
    use std::cell::Cell;

    fn titles(segments: &[ChapterSegment]) -> Vec<&str> {
        segments.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_basic_two_chapters() {
        let (chapters, seq) = split_text("Chapter 1\nA\n\nChapter 2\nB", true, false);
        assert_eq!(titles(&chapters), vec!["Chapter 1", "Chapter 2"]);
        assert_eq!(chapters[0].body, "A\n");
        assert_eq!(chapters[1].body, "B");
        assert_eq!(seq, vec![1, 2]);
    }

    #[test]
    fn test_detection_disabled() {
        let text = "Chapter 1\nA\n\nChapter 2\nB";
        let (chapters, seq) = split_text(text, false, false);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, CONTENT_TITLE);
        assert_eq!(chapters[0].body, text);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_headerless_text() {
        let (chapters, seq) = split_text("  just some prose\nand more prose  \n", true, false);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, CONTENT_TITLE);
        assert_eq!(chapters[0].body, "just some prose\nand more prose");
        assert!(seq.is_empty());
    }

    #[test]
    fn test_empty_text_still_yields_a_segment() {
        let (chapters, seq) = split_text("", true, false);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, CONTENT_TITLE);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_front_matter() {
        let (chapters, seq) =
            split_text("A Novel\nby Someone\n\nChapter 1\nIt begins.", true, false);
        assert_eq!(titles(&chapters), vec![FRONT_MATTER_TITLE, "Chapter 1"]);
        assert_eq!(chapters[0].body, "A Novel\nby Someone\n");
        assert_eq!(chapters[0].number, None);
        assert_eq!(seq, vec![1]);
    }

    #[test]
    fn test_blank_front_matter_skipped() {
        let (chapters, _) = split_text("\n\nChapter 1\nText", true, false);
        assert_eq!(titles(&chapters), vec!["Chapter 1"]);
    }

    #[test]
    fn test_quoted_chapter_mention_stays_in_body() {
        let text = "Chapter 1\n\"Chapter one,\" she read aloud.\nMore prose.";
        let (chapters, seq) = split_text(text, true, false);
        assert_eq!(chapters.len(), 1);
        assert!(chapters[0].body.contains("she read aloud"));
        assert_eq!(seq, vec![1]);
    }

    #[test]
    fn test_duplicate_heading_folded() {
        let text = "Chapter 3\nChapter 3\nActual text.";
        let (chapters, seq) = split_text(text, true, false);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Chapter 3");
        assert_eq!(chapters[0].body, "Chapter 3\nActual text.");
        assert_eq!(seq, vec![3]);
    }

    #[test]
    fn test_duplicate_outside_window_not_folded() {
        let text = "Chapter 3\nline\nline\nline\nline\nline\nChapter 3\nmore";
        let (chapters, seq) = split_text(text, true, false);
        assert_eq!(chapters.len(), 2);
        assert_eq!(seq, vec![3, 3]);
    }

    #[test]
    fn test_duplicate_with_real_body_not_folded() {
        let text = "Chapter 3\nreal text\nChapter 3\nmore";
        let (chapters, seq) = split_text(text, true, false);
        assert_eq!(chapters.len(), 2);
        assert_eq!(seq, vec![3, 3]);
    }

    #[test]
    fn test_sub_numbering() {
        let text = "Chapter 5\nfirst half is long enough\nto not be a duplicate\n\n\n\nChapter 5 (2 of 2)\nsecond half";
        let (chapters, seq) = split_text(text, true, false);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "Chapter 5 (Part 1)");
        assert_eq!(chapters[1].title, "Chapter 5 (2 of 2) (Part 2)");
        assert_eq!(seq, vec![5, 5]);
    }

    #[test]
    fn test_mixed_heading_kinds() {
        let text = "Part I\nintro\nChapter One\nbody\n12. Interlude\ntail";
        let (chapters, seq) = split_text(text, true, false);
        assert_eq!(
            titles(&chapters),
            vec!["Part I", "Chapter One", "12. Interlude"]
        );
        assert_eq!(seq, vec![1, 1, 12]);
    }

    #[test]
    fn test_chapters_and_sequence_parallel() {
        let (chapters, seq) = split_text("Chapter 1\na\nChapter 4\nb\nChapter 2\nc", true, false);
        let numbered = chapters.iter().filter(|c| c.number.is_some()).count();
        assert_eq!(numbered, seq.len());
        assert_eq!(seq, vec![1, 4, 2]);
    }

    struct FailingBulk;

    impl BulkSegmenter for FailingBulk {
        fn split(
            &self,
            _text: &str,
            _detect_headings: bool,
        ) -> crate::error::Result<(Vec<ChapterSegment>, Vec<i64>)> {
            Err(ChapterizeError::BulkSegmentation("db offline".to_string()))
        }
    }

    struct CannedBulk;

    impl BulkSegmenter for CannedBulk {
        fn split(
            &self,
            _text: &str,
            _detect_headings: bool,
        ) -> crate::error::Result<(Vec<ChapterSegment>, Vec<i64>)> {
            Ok((
                vec![ChapterSegment::new("Chapter 1", "from the db", Some(1))],
                vec![1],
            ))
        }
    }

    fn tiny_threshold() -> SplitOptions {
        SplitOptions {
            bulk_threshold_lines: 2,
            ..SplitOptions::default()
        }
    }

    #[test]
    fn test_bulk_used_above_threshold() {
        let splitter = ChapterSplitter::new(tiny_threshold()).with_bulk(Box::new(CannedBulk));
        let (chapters, seq) = splitter.split_text("Chapter 1\na\nb\nc", true, false);
        assert_eq!(chapters[0].body, "from the db");
        assert_eq!(seq, vec![1]);
    }

    #[test]
    fn test_bulk_skipped_below_threshold() {
        let splitter = ChapterSplitter::new(tiny_threshold()).with_bulk(Box::new(CannedBulk));
        let (chapters, _) = splitter.split_text("Chapter 1\na", true, false);
        assert_eq!(chapters[0].body, "a");
    }

    #[test]
    fn test_bulk_failure_falls_back_and_logs() {
        let splitter = ChapterSplitter::new(tiny_threshold()).with_bulk(Box::new(FailingBulk));
        let logged = Cell::new(false);
        let sink = |msg: &str| {
            assert!(msg.contains("db offline"));
            logged.set(true);
        };
        let (chapters, seq) = splitter.split_text_db("Chapter 1\na\nb\nc", true, Some(&sink));
        assert!(logged.get());
        assert_eq!(chapters[0].title, "Chapter 1");
        assert_eq!(seq, vec![1]);
    }

    #[test]
    fn test_force_no_db_bypasses_bulk() {
        let splitter = ChapterSplitter::new(tiny_threshold()).with_bulk(Box::new(CannedBulk));
        let (chapters, _) = splitter.split_text("Chapter 1\na\nb\nc", true, true);
        assert_eq!(chapters[0].body, "a\nb\nc");
    }
}
