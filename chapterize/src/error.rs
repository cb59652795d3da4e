use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChapterizeError {
    #[error("Invalid Roman numeral '{numeral}': unexpected character at position {position}")]
    InvalidRomanNumeral { numeral: String, position: usize },

    #[error("Unknown number word: {0}")]
    UnknownNumberWord(String),

    #[error("Bulk segmentation failed: {0}")]
    BulkSegmentation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ChapterizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_roman_message() {
        let err = ChapterizeError::InvalidRomanNumeral {
            numeral: "IXQ".to_string(),
            position: 2,
        };
        assert_eq!(
            err.to_string(),
            "Invalid Roman numeral 'IXQ': unexpected character at position 2"
        );
    }

    #[test]
    fn test_unknown_word_message() {
        let err = ChapterizeError::UnknownNumberWord("eleventy".to_string());
        assert_eq!(err.to_string(), "Unknown number word: eleventy");
    }
}
