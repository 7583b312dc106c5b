//! Line-oriented parser for canonical module files.
//!
//! # Format
//! ````markdown
//! # Module 03 — Joins
//! *Topics: inner joins, outer joins*
//!
//! ## 🔷 SQL: Inner joins
//! Prose lines...
//!
//! ### Sub-heading
//! ```sql
//! SELECT * FROM a JOIN b USING (id);
//! ```
//! ---
//! ## Self-Test
//! ````
//!
//! Each line drives an explicit state machine ([`transition`]) whose effects
//! are applied by a module builder. Unknown markup is kept as prose.

use crate::text::{fence_language, is_fence, is_rule};
use crate::types::{Block, Category, Module, Section};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static MODULE_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)module[-_ ]?(\d+)").expect("valid module number regex"));

static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digits regex"));

static MODULE_TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#\s+Module\s+\d+\s*[—–-]\s*(.*)$").expect("valid module title regex")
});

/// Emoji markers in section titles mapped to their category.
pub const CATEGORY_EMOJI: [(&str, Category); 5] = [
    ("🔷", Category::Sql),
    ("🔶", Category::Python),
    ("🟢", Category::Stats),
    ("🟠", Category::Ml),
    ("🟣", Category::Terminology),
];

/// Parser state between lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineState {
    OutsideSection,
    InSection,
    InCode {
        language: Option<String>,
        section_open: bool,
    },
}

/// What a single line asks the module builder to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<'a> {
    Nothing,
    SetTitle(String),
    SetSubtitle(String),
    OpenSection(&'a str),
    SubHeading(&'a str),
    Prose(&'a str),
    CodeLine(&'a str),
    CloseCode(Option<String>),
}

/// Compute the next state and the effect of one line.
pub fn transition<'a>(state: &LineState, line: &'a str) -> (LineState, Effect<'a>) {
    if let LineState::InCode {
        language,
        section_open,
    } = state
    {
        if is_fence(line) {
            let next = if *section_open {
                LineState::InSection
            } else {
                LineState::OutsideSection
            };
            return (next, Effect::CloseCode(language.clone()));
        }
        return (state.clone(), Effect::CodeLine(line));
    }

    let section_open = *state == LineState::InSection;

    if is_fence(line) {
        let next = LineState::InCode {
            language: fence_language(line),
            section_open,
        };
        return (next, Effect::Nothing);
    }

    if line.starts_with("# ") {
        return (state.clone(), Effect::SetTitle(module_title(line)));
    }

    if line.starts_with('*') && line.ends_with('*') && line.contains("Topics:") {
        let subtitle = line.trim_matches(|c| c == '*' || c == ' ').to_string();
        return (state.clone(), Effect::SetSubtitle(subtitle));
    }

    if is_rule(line) {
        return (state.clone(), Effect::Nothing);
    }

    if let Some(title) = line.strip_prefix("## ") {
        return (LineState::InSection, Effect::OpenSection(title.trim()));
    }

    if let Some(heading) = line.strip_prefix("### ") {
        let effect = if section_open {
            Effect::SubHeading(heading.trim())
        } else {
            Effect::Nothing
        };
        return (state.clone(), effect);
    }

    if section_open {
        (LineState::InSection, Effect::Prose(line))
    } else {
        (LineState::OutsideSection, Effect::Nothing)
    }
}

/// Parse a canonical module document.
///
/// The module number comes from the file name (`Module-07-Stats.md` → 7,
/// default 0) and the id is `module-NN`.
pub fn parse(content: &str, filename: &str) -> Module {
    let source = Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.to_string());
    let number = module_number(&source);

    let mut builder = ModuleBuilder::default();
    let mut state = LineState::OutsideSection;

    for line in content.lines() {
        let (next, effect) = transition(&state, line);
        builder.apply(effect);
        state = next;
    }

    if let LineState::InCode { language, .. } = state {
        builder.apply(Effect::CloseCode(language));
    }
    builder.flush_section();

    tracing::debug!(
        file = %source,
        number,
        sections = builder.sections.len(),
        "parsed module"
    );

    Module {
        id: format!("module-{:02}", number),
        title: builder.title,
        number,
        subtitle: builder.subtitle,
        sections: builder.sections,
        source,
    }
}

/// Module number from a file name; 0 when absent or out of range.
pub fn module_number(filename: &str) -> u32 {
    let digits = MODULE_NUMBER_REGEX
        .captures(filename)
        .and_then(|caps| caps.get(1))
        .or_else(|| DIGITS_REGEX.find(filename));
    digits
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn module_title(line: &str) -> String {
    match MODULE_TITLE_REGEX.captures(line.trim_end()) {
        Some(caps) => caps[1].trim().to_string(),
        None => line[2..].trim().to_string(),
    }
}

/// Category of a section from emoji markers, then title keywords.
pub fn detect_category(title: &str) -> Category {
    detect_category_with(title, &CATEGORY_EMOJI)
}

/// Category of a section title against an explicit emoji table.
pub fn detect_category_with(title: &str, emoji: &[(&str, Category)]) -> Category {
    if let Some((_, category)) = emoji.iter().find(|(marker, _)| title.contains(marker)) {
        return *category;
    }

    let t = title.to_lowercase();
    let has = |needle: &str| t.contains(needle);

    if has("speed definition") {
        Category::Terminology
    } else if has("sql") {
        Category::Sql
    } else if has("stats") || has("probability") {
        Category::Stats
    } else if has("ml") || has("machine learning") {
        Category::Ml
    } else if has("python") || has("pandas") {
        Category::Python
    } else if has("product") {
        Category::Product
    } else if has("behavioral") {
        Category::Behavioral
    } else if has("self-test") || has("self test") {
        Category::Review
    } else if has("round") {
        Category::Mixed
    } else if has("checklist") || has("final") {
        Category::Review
    } else if has("chicago") || has("company") {
        Category::Product
    } else if has("repeat") {
        if has("l1") || has("l2") {
            Category::Ml
        } else if has("standard error") || has("se ") {
            Category::Stats
        } else {
            Category::Review
        }
    } else {
        Category::General
    }
}

#[derive(Default)]
struct ModuleBuilder {
    title: String,
    subtitle: String,
    sections: Vec<Section>,
    current: Option<Section>,
    prose: Vec<String>,
    code: Vec<String>,
}

impl ModuleBuilder {
    fn apply(&mut self, effect: Effect<'_>) {
        match effect {
            Effect::Nothing => {}
            Effect::SetTitle(title) => self.title = title,
            Effect::SetSubtitle(subtitle) => self.subtitle = subtitle,
            Effect::OpenSection(title) => {
                self.flush_section();
                self.current = Some(Section::new(
                    title,
                    detect_category(title),
                    self.sections.len(),
                ));
            }
            Effect::SubHeading(text) => {
                self.flush_text();
                self.prose.push(format!("**{}**", text));
            }
            Effect::Prose(line) => self.prose.push(line.to_string()),
            Effect::CodeLine(line) => self.code.push(line.to_string()),
            Effect::CloseCode(language) => {
                let content = self.code.join("\n");
                self.code.clear();
                self.flush_text();
                if let Some(section) = self.current.as_mut() {
                    section.blocks.push(Block::code(content, language));
                }
            }
        }
    }

    fn flush_text(&mut self) {
        let text = self.prose.join("\n");
        self.prose.clear();
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if let Some(section) = self.current.as_mut() {
            section.blocks.push(Block::text(text));
        }
    }

    fn flush_section(&mut self) {
        self.flush_text();
        if let Some(section) = self.current.take() {
            self.sections.push(section);
        }
    }
}
