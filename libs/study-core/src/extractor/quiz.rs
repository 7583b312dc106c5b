//! `**Quick quiz**` / `**Answer:**` pairs.
//!
//! Pairs are read inline first. A block with no inline quiz falls back to a
//! line scan. Only line-scanned pairs look at the next block: the last pair
//! takes an immediately following code block as its answer.

use super::Extractor;
use crate::types::{Block, Category, Question, QuestionType, Section};
use once_cell::sync::Lazy;
use regex::Regex;

static QUIZ_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\*\*Quick quiz[^*]*\*\*[:\s]*").expect("valid quiz marker regex")
});

static QUIZ_END_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\n\n|\n\*\*Answer").expect("valid quiz end regex"));

static ANSWER_MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\*\*Answer:?\*\*[:\s]*").expect("valid answer marker regex"));

static QUIZ_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\*\*Quick quiz[^*]*\*\*[:\s]*(.*)$").expect("valid quiz line regex")
});

static ANSWER_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\*\*Answer:?\*\*[:\s]*(.*)$").expect("valid answer line regex"));

/// Tokens that mark an answer as code, matched case-sensitively.
pub const CODE_MARKERS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "GROUP BY", "def ", "import ", "pd.", "df.", "df[", ".loc[",
    ".groupby(",
];

/// A quiz prompt with its answer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPair {
    pub prompt: String,
    pub answer: String,
}

impl QuizPair {
    fn new(prompt: &str, answer: &str) -> Self {
        Self {
            prompt: prompt.trim().to_string(),
            answer: answer.trim().to_string(),
        }
    }
}

/// Whether an answer should be practiced as code.
pub fn looks_like_code(answer: &str, category: Category, markers: &[&str]) -> bool {
    matches!(category, Category::Sql | Category::Python)
        || markers.iter().any(|marker| answer.contains(marker))
}

fn default_language(category: Category) -> String {
    match category {
        Category::Sql => "sql".to_string(),
        _ => "python".to_string(),
    }
}

/// Which detection path produced a block's pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPath {
    Inline,
    LineScan,
}

/// Quiz pairs of one text block, tagged with the path that found them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPairs {
    pub path: QuizPath,
    pub pairs: Vec<QuizPair>,
}

/// Quiz pairs of one text block.
pub fn quiz_pairs(text: &str) -> BlockPairs {
    match inline_pairs(text) {
        Some(pairs) => BlockPairs {
            path: QuizPath::Inline,
            pairs,
        },
        None => BlockPairs {
            path: QuizPath::LineScan,
            pairs: line_pairs(text),
        },
    }
}

/// Inline pairs, or `None` when no quiz marker is followed by quiz text.
///
/// Quiz text runs to a blank line or the `**Answer` marker. The answer is
/// searched before the next quiz marker and runs to a blank line. A quiz
/// without an answer is dropped.
pub fn inline_pairs(text: &str) -> Option<Vec<QuizPair>> {
    let markers: Vec<(usize, usize)> = QUIZ_MARKER_REGEX
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut matched = false;
    let mut consumed = 0;
    let mut pairs = Vec::new();

    for &(start, body_start) in &markers {
        if start < consumed {
            continue;
        }
        // Quiz text is at least one character long.
        let search_from = body_start
            + text[body_start..]
                .chars()
                .next()
                .map_or(0, char::len_utf8);
        let Some(end) = QUIZ_END_REGEX.find_at(text, search_from) else {
            continue;
        };
        matched = true;
        let quiz_end = end.start();
        consumed = quiz_end;

        let bound = markers
            .iter()
            .map(|&(s, _)| s)
            .find(|&s| s >= quiz_end)
            .unwrap_or(text.len());
        let region = &text[quiz_end..bound];
        if let Some(marker) = ANSWER_MARKER_REGEX.find(region) {
            let rest = &region[marker.end()..];
            let answer = rest.find("\n\n").map_or(rest, |i| &rest[..i]);
            pairs.push(QuizPair::new(&text[body_start..quiz_end], answer));
        }
    }

    matched.then_some(pairs)
}

/// Line scan: a quiz line, then a later line starting `**Answer:**`.
///
/// Answer continuation lines stop at a blank line or a line starting `**`.
pub fn line_pairs(text: &str) -> Vec<QuizPair> {
    let lines: Vec<&str> = text.lines().collect();
    let mut prompt: Option<&str> = None;
    let mut pairs = Vec::new();

    for (i, &line) in lines.iter().enumerate() {
        if let Some(caps) = QUIZ_LINE_REGEX.captures(line) {
            prompt = caps.get(1).map(|m| m.as_str());
        } else if prompt.is_some() {
            let Some(caps) = ANSWER_LINE_REGEX.captures(line) else {
                continue;
            };
            let mut answer = caps[1].trim().to_string();
            for next in lines[i + 1..]
                .iter()
                .take_while(|l| !l.trim().is_empty() && !l.starts_with("**"))
            {
                answer.push('\n');
                answer.push_str(next);
            }
            if let Some(prompt) = prompt.take() {
                pairs.push(QuizPair::new(prompt, &answer));
            }
        }
    }
    pairs
}

pub fn extract(extractor: &Extractor<'_>, module_id: &str, section: &Section) -> Vec<Question> {
    let mut questions = Vec::new();

    for (i, block) in section.blocks.iter().enumerate() {
        if !block.is_text() {
            continue;
        }
        let following_code = section.blocks.get(i + 1).filter(|b| b.is_code());
        questions.extend(block_questions(
            extractor,
            module_id,
            section,
            quiz_pairs(&block.content),
            following_code,
        ));
    }
    questions
}

fn block_questions(
    extractor: &Extractor<'_>,
    module_id: &str,
    section: &Section,
    found: BlockPairs,
    following_code: Option<&Block>,
) -> Vec<Question> {
    let following_code = following_code.filter(|_| found.path == QuizPath::LineScan);
    let last = found.pairs.len().saturating_sub(1);

    found
        .pairs
        .into_iter()
        .enumerate()
        .filter(|(_, pair)| !pair.prompt.is_empty())
        .map(|(j, pair)| {
            let code = following_code.filter(|_| j == last);
            to_question(extractor, module_id, section, pair, code)
        })
        .collect()
}

fn to_question(
    extractor: &Extractor<'_>,
    module_id: &str,
    section: &Section,
    pair: QuizPair,
    code: Option<&Block>,
) -> Question {
    let category = section.category;
    let (question_type, answer, language) = match code {
        Some(code) => (
            QuestionType::CodePractice,
            format!("{}\n{}", pair.answer, code.content).trim().to_string(),
            Some(
                code.language
                    .clone()
                    .unwrap_or_else(|| default_language(category)),
            ),
        ),
        None if looks_like_code(&pair.answer, category, extractor.code_markers()) => (
            QuestionType::CodePractice,
            pair.answer,
            Some(default_language(category)),
        ),
        None => (QuestionType::FreeText, pair.answer, None),
    };

    extractor
        .question(module_id, section, category, question_type, pair.prompt, answer)
        .with_code_language(language)
}
