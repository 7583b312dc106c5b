//! Error types for study-core.
//!
//! Parsing, segmenting and extracting never fail; malformed markdown degrades
//! to looser strategies instead. The only fallible operations are conversions
//! from free-form strings into the closed enums of the data model.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised when converting strings into typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown question type: {0}")]
    UnknownQuestionType(String),

    #[error("unknown block kind: {0}")]
    UnknownBlockKind(String),

    #[error("unknown question source: {0}")]
    UnknownSource(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ParseError::UnknownCategory("art".to_string()).to_string(),
            "unknown category: art"
        );
        assert_eq!(
            ParseError::UnknownQuestionType("essay".to_string()).to_string(),
            "unknown question type: essay"
        );
    }
}
