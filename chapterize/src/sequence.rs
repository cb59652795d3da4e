//! Sequence validation: explain how a parsed chapter-number sequence
//! departs from a clean ascending-by-one run.
//!
//! The exact message wording is a stable contract consumed downstream; do
//! not reword without updating every caller that matches on these strings.

/// Scan a chapter-number sequence and describe every anomaly.
///
/// One left-to-right pass over adjacent pairs; the input is never reordered
/// or deduplicated, and messages appear in discovery order. Never fails,
/// for any input including empty, single-element, negative, or descending
/// sequences.
pub fn detect_issues(sequence: &[i64]) -> Vec<String> {
    let mut issues = Vec::new();
    let mut i = 1;

    while i < sequence.len() {
        let prev = sequence[i - 1];
        let cur = sequence[i];

        if cur == prev {
            // A run of equal values. Each redundant occurrence produces a
            // message pair, with the count ticking down toward 1.
            let run_start = i - 1;
            let mut end = i;
            while end < sequence.len() && sequence[end] == prev {
                end += 1;
            }
            let redundant = end - run_start - 1;
            let before = if run_start == 0 {
                prev
            } else {
                sequence[run_start - 1]
            };
            for count in (1..=redundant).rev() {
                let times = if count == 1 { "time" } else { "times" };
                issues.push(format!(
                    "number {prev} is repeated {count} {times} after number {before}"
                ));
                issues.push(format!(
                    "number {prev} is out of place after number {prev}"
                ));
            }
            i = end;
            continue;
        }

        if cur > prev + 1 {
            for missing in prev + 1..cur {
                issues.push(format!("number {missing} is missing"));
            }
        } else if cur == prev - 1 {
            issues.push(format!(
                "number {cur} is switched in place with number {prev}"
            ));
            issues.push(format!(
                "number {prev} is switched in place with number {cur}"
            ));
        } else if cur < prev - 1 {
            issues.push(format!(
                "number {cur} is out of place after number {prev}"
            ));
        }

        i += 1;
    }

    issues
}
