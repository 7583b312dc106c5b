//! API request and response types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export shared types from study-core
pub use study_core::types::{
    Block, BlockKind, Category, Module, Question, QuestionSource, QuestionType, Section,
};

/// Title given to pasted content submitted without one.
pub const DEFAULT_IMPORT_TITLE: &str = "Imported Content";

/// Section title of manually authored questions submitted without one.
pub const DEFAULT_MANUAL_SECTION: &str = "Custom";

// === Ingestion ===

/// What to do with pasted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestAction {
    Preview,
    Save,
}

impl Default for IngestAction {
    fn default() -> Self {
        Self::Preview
    }
}

/// Request to import pasted notes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub action: IngestAction,
}

impl IngestRequest {
    /// Submitted title, or the default when blank or missing.
    pub fn title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => DEFAULT_IMPORT_TITLE,
        }
    }
}

/// Segmented module with its extracted questions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub module: Module,
    pub questions: Vec<Question>,
    pub saved: bool,
}

/// Per-module line of a batch ingestion report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleReport {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub source: String,
    pub sections: usize,
    pub questions: usize,
    pub question_types: BTreeMap<QuestionType, usize>,
}

/// Result of ingesting a modules directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub modules: Vec<ModuleReport>,
    pub total_modules: usize,
    pub total_sections: usize,
    pub total_questions: usize,
    pub question_types: BTreeMap<QuestionType, usize>,
    pub ingested_at: DateTime<Utc>,
}

impl IngestReport {
    /// Build totals from per-module lines.
    pub fn new(modules: Vec<ModuleReport>) -> Self {
        let mut question_types = BTreeMap::new();
        for report in &modules {
            for (question_type, count) in &report.question_types {
                *question_types.entry(*question_type).or_insert(0) += count;
            }
        }
        Self {
            total_modules: modules.len(),
            total_sections: modules.iter().map(|m| m.sections).sum(),
            total_questions: modules.iter().map(|m| m.questions).sum(),
            question_types,
            modules,
            ingested_at: Utc::now(),
        }
    }
}

// === Modules ===

/// Module listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSummary {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub subtitle: String,
    pub section_count: usize,
    pub question_count: usize,
}

impl ModuleSummary {
    pub fn new(module: &Module, question_count: usize) -> Self {
        Self {
            id: module.id.clone(),
            number: module.number,
            title: module.title.clone(),
            subtitle: module.subtitle.clone(),
            section_count: module.sections.len(),
            question_count,
        }
    }
}

/// Response for module listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleListResponse {
    pub modules: Vec<ModuleSummary>,
}

// === Questions ===

/// Query string filters for question listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionQuery {
    pub module: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
}

/// Parsed question filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub category: Option<Category>,
    pub question_type: Option<QuestionType>,
}

impl QuestionFilter {
    /// Parse filters, ignoring blank values.
    pub fn parse(query: &QuestionQuery) -> study_core::Result<Self> {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Ok(Self {
            category: non_blank(&query.category)
                .map(|v| v.parse::<Category>())
                .transpose()?,
            question_type: non_blank(&query.question_type)
                .map(|v| v.parse::<QuestionType>())
                .transpose()?,
        })
    }

    pub fn matches(&self, question: &Question) -> bool {
        self.category.map_or(true, |c| question.category == c)
            && self
                .question_type
                .map_or(true, |t| question.question_type == t)
    }
}

/// Response for question listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
    pub total: usize,
}

/// Manually authored question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub module_id: String,
    #[serde(default)]
    pub section_title: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default = "default_question_type")]
    pub question_type: QuestionType,
    pub prompt: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub code_language: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub blanks: Vec<String>,
    #[serde(default)]
    pub rubric: Vec<String>,
}

fn default_question_type() -> QuestionType {
    QuestionType::FreeText
}

impl NewQuestion {
    /// Build the stored question with a fresh id.
    pub fn into_question(self, id: String) -> Question {
        let section_title = self
            .section_title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MANUAL_SECTION.to_string());
        let mut question = Question::new(
            id,
            &self.module_id,
            &section_title,
            self.category,
            self.question_type,
            self.prompt,
            self.answer,
        )
        .with_code_language(non_empty(self.code_language))
        .with_rubric(clean_lines(self.rubric));
        question.options = clean_lines(self.options);
        question.blanks = clean_lines(self.blanks);
        question.source = QuestionSource::Manual;
        question
    }
}

/// Partial update of a stored question
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionUpdate {
    pub section_title: Option<String>,
    pub category: Option<Category>,
    pub question_type: Option<QuestionType>,
    pub prompt: Option<String>,
    pub answer: Option<String>,
    /// An empty string clears the language.
    pub code_language: Option<String>,
    pub options: Option<Vec<String>>,
    pub blanks: Option<Vec<String>>,
    pub rubric: Option<Vec<String>>,
}

impl QuestionUpdate {
    pub fn apply(self, question: &mut Question) {
        if let Some(title) = self.section_title {
            question.section_title = title;
        }
        if let Some(category) = self.category {
            question.category = category;
        }
        if let Some(question_type) = self.question_type {
            question.question_type = question_type;
        }
        if let Some(prompt) = self.prompt {
            question.prompt = prompt;
        }
        if let Some(answer) = self.answer {
            question.answer = answer;
        }
        if let Some(language) = self.code_language {
            question.code_language = non_empty(Some(language));
        }
        if let Some(options) = self.options {
            question.options = clean_lines(options);
        }
        if let Some(blanks) = self.blanks {
            question.blanks = clean_lines(blanks);
        }
        if let Some(rubric) = self.rubric {
            question.rubric = clean_lines(rubric);
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn query(category: Option<&str>, question_type: Option<&str>) -> QuestionQuery {
        QuestionQuery {
            module: None,
            category: category.map(str::to_string),
            question_type: question_type.map(str::to_string),
        }
    }

    #[test]
    fn test_ingest_request_defaults() {
        let req: IngestRequest = serde_json::from_str(r#"{"content": "x"}"#).unwrap();
        assert_eq!(req.action, IngestAction::Preview);
        assert_eq!(req.title(), DEFAULT_IMPORT_TITLE);

        let req: IngestRequest =
            serde_json::from_str(r#"{"content": "x", "title": "  ", "action": "save"}"#).unwrap();
        assert_eq!(req.action, IngestAction::Save);
        assert_eq!(req.title(), DEFAULT_IMPORT_TITLE);
    }

    #[test]
    fn test_filter_parsing() {
        let filter = QuestionFilter::parse(&query(Some("SQL"), Some("code_practice"))).unwrap();
        assert_eq!(filter.category, Some(Category::Sql));
        assert_eq!(filter.question_type, Some(QuestionType::CodePractice));

        let filter = QuestionFilter::parse(&query(Some(""), None)).unwrap();
        assert_eq!(filter, QuestionFilter::default());

        assert!(QuestionFilter::parse(&query(Some("poetry"), None)).is_err());
        assert!(QuestionFilter::parse(&query(None, Some("essay"))).is_err());
    }

    #[test]
    fn test_new_question_is_manual() {
        let new: NewQuestion = serde_json::from_str(
            r#"{"module_id": "module-01", "prompt": "Define a CTE", "options": ["a", " ", "b "]}"#,
        )
        .unwrap();
        let question = new.into_question("abc12345".to_string());

        assert_eq!(question.id, "abc12345");
        assert_eq!(question.section_title, DEFAULT_MANUAL_SECTION);
        assert_eq!(question.category, Category::General);
        assert_eq!(question.question_type, QuestionType::FreeText);
        assert_eq!(question.source, QuestionSource::Manual);
        assert_eq!(question.options, vec!["a", "b"]);
        assert_eq!(question.code_language, None);
    }

    #[test]
    fn test_update_applies_only_given_fields() {
        let mut question = Question::new(
            "q-1".to_string(),
            "m",
            "s",
            Category::Sql,
            QuestionType::CodePractice,
            "p",
            "a",
        )
        .with_code_language(Some("sql".to_string()));

        let update: QuestionUpdate =
            serde_json::from_str(r#"{"answer": "new", "code_language": ""}"#).unwrap();
        update.apply(&mut question);

        assert_eq!(question.answer, "new");
        assert_eq!(question.prompt, "p");
        assert_eq!(question.category, Category::Sql);
        assert_eq!(question.code_language, None);
    }

    #[test]
    fn test_report_totals() {
        let line = |sections, questions, free| ModuleReport {
            id: "m".to_string(),
            number: 1,
            title: "t".to_string(),
            source: "m.md".to_string(),
            sections,
            questions,
            question_types: BTreeMap::from([(QuestionType::FreeText, free)]),
        };
        let report = IngestReport::new(vec![line(2, 3, 3), line(4, 1, 1)]);
        assert_eq!(report.total_modules, 2);
        assert_eq!(report.total_sections, 6);
        assert_eq!(report.total_questions, 4);
        assert_eq!(report.question_types.get(&QuestionType::FreeText), Some(&4));
    }
}
