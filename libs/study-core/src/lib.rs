//! Core study-notes library shared by the backend service and its tools.
//!
//! Provides:
//! - Canonical module parser (line-oriented state machine)
//! - Cascading segmenter for unstructured pasted text
//! - Question extractor for quiz, self-test, round and STAR conventions
//! - Keyword category classifier
//! - Shared types (Module, Section, Block, Question, etc.)
//!
//! Nothing here fails on malformed markdown; degraded input yields fewer
//! sections or questions instead of errors.

pub mod blocks;
pub mod classify;
pub mod error;
pub mod extractor;
pub mod ids;
pub mod module_parser;
pub mod segmenter;
pub mod text;
pub mod types;

pub use classify::{classify, classify_with, KeywordTable};
pub use error::{ParseError, Result};
pub use extractor::{extract, type_counts, Extractor, SectionKind};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use module_parser::{detect_category, module_number, parse};
pub use segmenter::{segment, segment_as};
pub use types::{
    Block, BlockKind, Category, Module, Question, QuestionSource, QuestionType, Section,
};
