//! Core types for the study content graph.
//!
//! The serialized field names of these types are the stored-record schema
//! shared with persistence, rendering and progress collaborators.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topic tag attached to sections and questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sql,
    Python,
    Stats,
    Ml,
    Terminology,
    Behavioral,
    Product,
    Review,
    Mixed,
    General,
}

impl Default for Category {
    fn default() -> Self {
        Self::General
    }
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 10] = [
        Self::Sql,
        Self::Python,
        Self::Stats,
        Self::Ml,
        Self::Terminology,
        Self::Behavioral,
        Self::Product,
        Self::Review,
        Self::Mixed,
        Self::General,
    ];

    /// Get the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::Python => "python",
            Self::Stats => "stats",
            Self::Ml => "ml",
            Self::Terminology => "terminology",
            Self::Behavioral => "behavioral",
            Self::Product => "product",
            Self::Review => "review",
            Self::Mixed => "mixed",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ParseError::UnknownCategory(s.to_string()))
    }
}

/// Kind of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Text,
    Code,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Code => "code",
        }
    }
}

impl FromStr for BlockKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(Self::Text),
            "code" => Ok(Self::Code),
            other => Err(ParseError::UnknownBlockKind(other.to_string())),
        }
    }
}

/// Atomic unit of section content: prose or a fenced code snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    /// For code blocks, the fence delimiter lines are not included.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Block {
    /// Create a prose block.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Text,
            content: content.into(),
            language: None,
        }
    }

    /// Create a code block with an optional language tag.
    pub fn code(content: impl Into<String>, language: Option<String>) -> Self {
        Self {
            kind: BlockKind::Code,
            content: content.into(),
            language,
        }
    }

    pub fn is_code(&self) -> bool {
        self.kind == BlockKind::Code
    }

    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }
}

/// Titled, categorized subdivision of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Dense 0-based position among the sibling sections of a module.
    #[serde(default)]
    pub order: usize,
}

impl Section {
    pub fn new(title: impl Into<String>, category: Category, order: usize) -> Self {
        Self {
            title: title.into(),
            category,
            blocks: Vec::new(),
            order,
        }
    }

    /// Contents of all text blocks joined by newlines.
    pub fn text_content(&self) -> String {
        self.blocks
            .iter()
            .filter(|b| b.is_text())
            .map(|b| b.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Top-level unit of study content, one lesson or document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub title: String,
    pub number: u32,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// File name the module was parsed from; empty for pasted imports.
    #[serde(default)]
    pub source: String,
}

impl Module {
    /// Look up a section by title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Re-number section orders densely from zero.
    pub fn renumber(&mut self) {
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.order = i;
        }
    }
}

/// Question presentation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    CodePractice,
    Flashcard,
    FreeText,
    FillBlank,
    MultipleChoice,
    StarPractice,
}

impl QuestionType {
    pub const ALL: [QuestionType; 6] = [
        Self::CodePractice,
        Self::Flashcard,
        Self::FreeText,
        Self::FillBlank,
        Self::MultipleChoice,
        Self::StarPractice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CodePractice => "code_practice",
            Self::Flashcard => "flashcard",
            Self::FreeText => "free_text",
            Self::FillBlank => "fill_blank",
            Self::MultipleChoice => "multiple_choice",
            Self::StarPractice => "star_practice",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ParseError::UnknownQuestionType(s.to_string()))
    }
}

/// Whether a question was extracted automatically or authored by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    Auto,
    Manual,
}

impl Default for QuestionSource {
    fn default() -> Self {
        Self::Auto
    }
}

impl FromStr for QuestionSource {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            other => Err(ParseError::UnknownSource(other.to_string())),
        }
    }
}

/// Typed quiz item derived from section content.
///
/// `question_type` decides which optional fields carry meaning:
/// `code_language` for code practice, `options` for multiple choice,
/// `blanks` for fill-in-the-blank and `rubric` for STAR and free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub module_id: String,
    #[serde(default)]
    pub section_title: String,
    #[serde(default)]
    pub category: Category,
    pub question_type: QuestionType,
    pub prompt: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blanks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rubric: Vec<String>,
    #[serde(default)]
    pub source: QuestionSource,
}

impl Question {
    /// Create an automatically extracted question with no optional fields set.
    pub fn new(
        id: String,
        module_id: &str,
        section_title: &str,
        category: Category,
        question_type: QuestionType,
        prompt: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id,
            module_id: module_id.to_string(),
            section_title: section_title.to_string(),
            category,
            question_type,
            prompt: prompt.into(),
            answer: answer.into(),
            code_language: None,
            options: Vec::new(),
            blanks: Vec::new(),
            rubric: Vec::new(),
            source: QuestionSource::Auto,
        }
    }

    pub fn with_code_language(mut self, language: Option<String>) -> Self {
        self.code_language = language;
        self
    }

    pub fn with_rubric(mut self, rubric: Vec<String>) -> Self {
        self.rubric = rubric;
        self
    }

    pub fn is_code(&self) -> bool {
        self.question_type == QuestionType::CodePractice
    }
}
