//! Behavioral interview prompts practiced with the STAR framework.

use super::Extractor;
use crate::types::{Category, Question, QuestionType, Section};
use once_cell::sync::Lazy;
use regex::Regex;

static QUOTED_PROMPT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\*\*(?:\d+\.\s*)?"([^"]+)"\*\*(?:\s*\((\d+\s*min)\))?"#)
        .expect("valid quoted prompt regex")
});

/// Minimum prompt length, in characters, for a homework line to count.
pub const MIN_HOMEWORK_PROMPT_CHARS: usize = 20;

pub const HOMEWORK_ANSWER: &str =
    "Use the STAR framework: Situation, Task, Action, Result. Keep under 2 minutes.";

pub const QUOTED_ANSWER: &str = "Use the STAR framework: Situation, Task, Action, Result.";

pub const STAR_RUBRIC: [&str; 5] = [
    "Used \"I\" not \"we\"",
    "Quantified the result",
    "Kept under 2 minutes",
    "Clear situation/context",
    "Specific actions taken",
];

/// Phrases that make a quoted prompt an interview question.
pub const INTERROGATIVE_CUES: [&str; 4] =
    ["tell me", "describe", "how do you", "give me an example"];

pub fn star_rubric() -> Vec<String> {
    STAR_RUBRIC.iter().map(|s| s.to_string()).collect()
}

/// Prompt from a `homework:` or `practice:` line, if long enough.
pub fn homework_prompt(line: &str) -> Option<&str> {
    let lower = line.to_lowercase();
    if !(lower.contains("homework") || lower.contains("practice")) {
        return None;
    }
    let (_, after) = line.split_once(':')?;
    let prompt = after.trim_matches(|c: char| c == '*' || c == '"' || c.is_whitespace());
    (prompt.chars().count() > MIN_HOMEWORK_PROMPT_CHARS).then_some(prompt)
}

/// Quoted bold prompts such as `**"Tell me about a conflict"** (2 min)`.
pub fn quoted_prompts(text: &str) -> Vec<&str> {
    QUOTED_PROMPT_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|prompt| {
            let lower = prompt.to_lowercase();
            INTERROGATIVE_CUES.iter().any(|cue| lower.contains(cue))
        })
        .collect()
}

pub fn extract(extractor: &Extractor<'_>, module_id: &str, section: &Section) -> Vec<Question> {
    let mut questions = Vec::new();
    let star = |prompt: &str, answer: &str| {
        extractor
            .question(
                module_id,
                section,
                Category::Behavioral,
                QuestionType::StarPractice,
                prompt,
                answer,
            )
            .with_rubric(star_rubric())
    };

    for block in section.blocks.iter().filter(|b| b.is_text()) {
        for line in block.content.lines() {
            let Some(prompt) = homework_prompt(line) else {
                continue;
            };
            // The quoted pass below picks this one up.
            if quoted_prompts(line).contains(&prompt) {
                continue;
            }
            questions.push(star(prompt, HOMEWORK_ANSWER));
        }
        for prompt in quoted_prompts(&block.content) {
            questions.push(star(prompt, QUOTED_ANSWER));
        }
    }
    questions
}
