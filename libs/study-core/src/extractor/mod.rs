//! Question extraction from parsed modules.
//!
//! Each section is routed by its title to one strategy:
//!
//! - self-test sections: numbered questions paired with numbered answers
//! - `Round N` sections: bold numbered drill items
//! - behavioral / STAR sections: homework and quoted interview prompts, plus
//!   the quick-quiz scan below
//! - everything else: `**Quick quiz**` / `**Answer:**` pairs
//!
//! Extraction never fails; sections without recognizable items yield nothing.

pub mod behavioral;
pub mod quiz;
pub mod rounds;

use crate::ids::{IdGenerator, RandomIds};
use crate::text::normalize;
use crate::types::{Category, Module, Question, QuestionType, Section};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

static ROUND_TITLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^a-z0-9]*round\s+\d+").expect("valid round title regex"));

/// Extraction strategy chosen for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    SelfTest,
    Round,
    Behavioral,
    QuickQuiz,
}

impl SectionKind {
    /// Route a section by its title, first matching rule wins.
    pub fn of(title: &str) -> Self {
        let t = title.to_lowercase();
        if t.contains("self-test") || t.contains("self test") {
            Self::SelfTest
        } else if ROUND_TITLE_REGEX.is_match(&t) {
            Self::Round
        } else if t.contains("behavioral") || star_after_colon(&t) {
            Self::Behavioral
        } else {
            Self::QuickQuiz
        }
    }
}

fn star_after_colon(title: &str) -> bool {
    match title.rsplit_once(':') {
        Some((_, after)) => after.contains("star"),
        None => false,
    }
}

/// Extracts typed questions using an injectable id source.
pub struct Extractor<'a> {
    ids: &'a dyn IdGenerator,
    code_markers: &'a [&'a str],
}

impl<'a> Extractor<'a> {
    pub fn new(ids: &'a dyn IdGenerator) -> Self {
        Self {
            ids,
            code_markers: quiz::CODE_MARKERS,
        }
    }

    /// Replace the tokens that mark a quiz answer as code.
    pub fn with_code_markers(mut self, markers: &'a [&'a str]) -> Self {
        self.code_markers = markers;
        self
    }

    /// Extract questions from every section, in section order.
    pub fn extract(&self, module: &Module) -> Vec<Question> {
        let questions: Vec<Question> = module
            .sections
            .iter()
            .flat_map(|section| self.extract_section(&module.id, section))
            .collect();

        tracing::debug!(
            module = %module.id,
            sections = module.sections.len(),
            questions = questions.len(),
            "extracted questions"
        );
        questions
    }

    /// Extract questions from a single section.
    pub fn extract_section(&self, module_id: &str, section: &Section) -> Vec<Question> {
        let kind = SectionKind::of(&section.title);
        let questions = match kind {
            SectionKind::SelfTest => self_test::extract(self, module_id, section),
            SectionKind::Round => rounds::extract(self, module_id, section),
            SectionKind::Behavioral => {
                let mut questions = behavioral::extract(self, module_id, section);
                let star_prompts: HashSet<String> =
                    questions.iter().map(|q| normalize(&q.prompt)).collect();
                questions.extend(
                    quiz::extract(self, module_id, section)
                        .into_iter()
                        .filter(|q| !star_prompts.contains(&normalize(&q.prompt))),
                );
                questions
            }
            SectionKind::QuickQuiz => quiz::extract(self, module_id, section),
        };

        tracing::trace!(
            section = %section.title,
            ?kind,
            questions = questions.len(),
            "extracted section"
        );
        questions
    }

    pub(crate) fn code_markers(&self) -> &[&str] {
        self.code_markers
    }

    /// New automatically sourced question with a fresh id.
    pub(crate) fn question(
        &self,
        module_id: &str,
        section: &Section,
        category: Category,
        question_type: QuestionType,
        prompt: impl Into<String>,
        answer: impl Into<String>,
    ) -> Question {
        Question::new(
            self.ids.next_id(),
            module_id,
            &section.title,
            category,
            question_type,
            prompt,
            answer,
        )
    }
}

/// Extract questions with random ids.
pub fn extract(module: &Module) -> Vec<Question> {
    Extractor::new(&RandomIds).extract(module)
}

/// Count questions per type, ordered by type.
pub fn type_counts(questions: &[Question]) -> BTreeMap<QuestionType, usize> {
    let mut counts = BTreeMap::new();
    for question in questions {
        *counts.entry(question.question_type).or_insert(0) += 1;
    }
    counts
}
