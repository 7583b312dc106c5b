//! Round-based drills: `Round N` sections of bold numbered items.
//!
//! Both `**1.** prompt` and `**1. prompt**` open an item. Lines and code
//! blocks up to the next item form its answer.

use super::behavioral::star_rubric;
use super::Extractor;
use crate::types::{Category, Question, QuestionType, Section};
use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*(\d+)\.?\*\*\s*(.*)$").expect("valid bold number regex"));

static BOLD_ITEM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*(\d+)\.\s+(.*?)\*\*").expect("valid bold item regex"));

/// Question type implied by a round title.
pub fn round_question_type(title: &str) -> QuestionType {
    let t = title.to_lowercase();
    if t.contains("definition") {
        QuestionType::Flashcard
    } else if t.contains("sql") || t.contains("python") || t.contains("pandas") {
        QuestionType::CodePractice
    } else if t.contains("behavioral") {
        QuestionType::StarPractice
    } else {
        QuestionType::FreeText
    }
}

/// Narrow the generic `mixed` category using round title keywords.
pub fn round_category(title: &str, category: Category) -> Category {
    if category != Category::Mixed {
        return category;
    }
    let t = title.to_lowercase();
    if t.contains("sql") {
        Category::Sql
    } else if t.contains("python") || t.contains("pandas") {
        Category::Python
    } else if t.contains("stats") || t.contains("probability") {
        Category::Stats
    } else if t.contains("ml") {
        Category::Ml
    } else if t.contains("product") {
        Category::Product
    } else if t.contains("behavioral") {
        Category::Behavioral
    } else if t.contains("definition") {
        Category::Terminology
    } else {
        Category::Mixed
    }
}

/// Prompt of a bold numbered item line.
fn item_prompt(line: &str) -> Option<String> {
    let line = line.trim_start();
    let caps = BOLD_NUMBER_REGEX
        .captures(line)
        .or_else(|| BOLD_ITEM_REGEX.captures(line))?;
    Some(caps[2].trim().trim_end_matches('*').trim().to_string())
}

struct Pending {
    prompt: String,
    answer: Vec<String>,
}

pub fn extract(extractor: &Extractor<'_>, module_id: &str, section: &Section) -> Vec<Question> {
    let question_type = round_question_type(&section.title);
    let category = round_category(&section.title, section.category);
    let code_language = match (question_type, category) {
        (QuestionType::CodePractice, Category::Sql) => Some("sql".to_string()),
        (QuestionType::CodePractice, _) => Some("python".to_string()),
        _ => None,
    };

    let mut questions = Vec::new();
    let mut pending: Option<Pending> = None;

    let emit = |pending: Pending, questions: &mut Vec<Question>| {
        if pending.prompt.is_empty() {
            return;
        }
        let answer = pending.answer.join("\n").trim().to_string();
        let mut question = extractor
            .question(
                module_id,
                section,
                category,
                question_type,
                pending.prompt,
                answer,
            )
            .with_code_language(code_language.clone());
        if question_type == QuestionType::StarPractice {
            question = question.with_rubric(star_rubric());
        }
        questions.push(question);
    };

    for block in &section.blocks {
        if block.is_code() {
            if let Some(p) = pending.as_mut() {
                if question_type == QuestionType::CodePractice {
                    p.answer.push(block.content.clone());
                } else {
                    p.answer.push(format!(
                        "```{}\n{}\n```",
                        block.language.as_deref().unwrap_or(""),
                        block.content
                    ));
                }
            }
            continue;
        }

        for line in block.content.lines() {
            if let Some(prompt) = item_prompt(line) {
                if let Some(done) = pending.take() {
                    emit(done, &mut questions);
                }
                pending = Some(Pending {
                    prompt,
                    answer: Vec::new(),
                });
            } else if let Some(p) = pending.as_mut() {
                if !line.trim().is_empty() {
                    p.answer.push(line.to_string());
                }
            }
        }
    }

    if let Some(done) = pending.take() {
        emit(done, &mut questions);
    }
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::types::Block;
    use pretty_assertions::assert_eq;

    fn round(title: &str, category: Category, blocks: Vec<Block>) -> Section {
        Section {
            title: title.to_string(),
            category,
            blocks,
            order: 0,
        }
    }

    #[test]
    fn answers_stop_at_next_marker() {
        let section = round(
            "Round 1: Warm-up",
            Category::Mixed,
            vec![Block::text(
                "**1.** Q1\nfirst answer line\n\nsecond answer line\n**2.** Q2\nanswer two",
            )],
        );
        let ids = SequentialIds::default();
        let questions = extract(&Extractor::new(&ids), "m", &section);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].prompt, "Q1");
        assert_eq!(questions[0].answer, "first answer line\nsecond answer line");
        assert_eq!(questions[1].prompt, "Q2");
        assert_eq!(questions[1].answer, "answer two");
        assert_eq!(questions[0].question_type, QuestionType::FreeText);
        assert_eq!(questions[0].category, Category::Mixed);
        assert_eq!(questions[0].code_language, None);
    }

    #[test]
    fn whole_bold_items_are_accepted() {
        assert_eq!(item_prompt("**3. What is a CTE?**"), Some("What is a CTE?".to_string()));
        assert_eq!(item_prompt("**4** Bare number"), Some("Bare number".to_string()));
        assert_eq!(item_prompt("**Note:** not an item"), None);
    }

    #[test]
    fn sql_round_keeps_raw_code() {
        let section = round(
            "Round 2: SQL",
            Category::Sql,
            vec![
                Block::text("**1.** Top customers by revenue"),
                Block::code("SELECT id FROM customers;", Some("sql".to_string())),
            ],
        );
        let ids = SequentialIds::default();
        let questions = extract(&Extractor::new(&ids), "m", &section);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_type, QuestionType::CodePractice);
        assert_eq!(questions[0].answer, "SELECT id FROM customers;");
        assert_eq!(questions[0].code_language.as_deref(), Some("sql"));
    }

    #[test]
    fn prose_rounds_fence_code() {
        let section = round(
            "Round 3: Speed definitions",
            Category::Mixed,
            vec![
                Block::text("**1. Define variance**\nSpread around the mean."),
                Block::code("np.var(x)", Some("python".to_string())),
            ],
        );
        let ids = SequentialIds::default();
        let questions = extract(&Extractor::new(&ids), "m", &section);
        assert_eq!(questions[0].question_type, QuestionType::Flashcard);
        assert_eq!(questions[0].category, Category::Terminology);
        assert_eq!(
            questions[0].answer,
            "Spread around the mean.\n```python\nnp.var(x)\n```"
        );
    }

    #[test]
    fn pandas_round_defaults_to_python() {
        let section = round(
            "Round 5: Pandas",
            Category::Mixed,
            vec![Block::text("**1.** Group by user\ndf.groupby('user').size()")],
        );
        let ids = SequentialIds::default();
        let questions = extract(&Extractor::new(&ids), "m", &section);
        assert_eq!(questions[0].category, Category::Python);
        assert_eq!(questions[0].code_language.as_deref(), Some("python"));
    }

    #[test]
    fn behavioral_round_carries_rubric() {
        let section = round(
            "Round 6: Behavioral",
            Category::Mixed,
            vec![Block::text("**1.** A time you failed")],
        );
        let ids = SequentialIds::default();
        let questions = extract(&Extractor::new(&ids), "m", &section);
        assert_eq!(questions[0].question_type, QuestionType::StarPractice);
        assert_eq!(questions[0].category, Category::Behavioral);
        assert_eq!(questions[0].rubric.len(), 5);
        assert_eq!(questions[0].answer, "");
    }

    #[test]
    fn lines_before_first_item_are_ignored() {
        let section = round(
            "Round 7",
            Category::Mixed,
            vec![
                Block::text("Set a timer.\n**1.** Only question\nanswer"),
                Block::code("ignored? no", None),
            ],
        );
        let ids = SequentialIds::default();
        let questions = extract(&Extractor::new(&ids), "m", &section);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].answer, "answer\n```\nignored? no\n```");
    }
}
