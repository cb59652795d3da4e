//! Segmentation options, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

const DEFAULT_DUPLICATE_WINDOW: usize = 4;
const DEFAULT_BULK_THRESHOLD_LINES: usize = 100_000;

/// Tunable knobs for the chapter segmenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitOptions {
    /// How many lines after a heading a restated heading with the same
    /// number is folded away as a duplicate.
    #[serde(default = "default_duplicate_window")]
    pub duplicate_window: usize,

    /// Line count above which segmentation is first attempted through the
    /// bulk collaborator, when one is configured.
    #[serde(default = "default_bulk_threshold_lines")]
    pub bulk_threshold_lines: usize,
}

fn default_duplicate_window() -> usize {
    DEFAULT_DUPLICATE_WINDOW
}

fn default_bulk_threshold_lines() -> usize {
    DEFAULT_BULK_THRESHOLD_LINES
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            duplicate_window: default_duplicate_window(),
            bulk_threshold_lines: default_bulk_threshold_lines(),
        }
    }
}

impl SplitOptions {
    /// Load options from a TOML file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SplitOptions::default();
        assert_eq!(options.duplicate_window, 4);
        assert_eq!(options.bulk_threshold_lines, 100_000);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let options: SplitOptions = toml::from_str("duplicate_window = 2").unwrap();
        assert_eq!(options.duplicate_window, 2);
        assert_eq!(options.bulk_threshold_lines, 100_000);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let options: SplitOptions = toml::from_str("").unwrap();
        assert_eq!(options.duplicate_window, 4);
    }
}
