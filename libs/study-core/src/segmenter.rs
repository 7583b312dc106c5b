//! Segmenter for unstructured, pasted markdown.
//!
//! Three strategies are tried in order and the first that applies wins:
//!
//! 1. header split on level 1-3 ATX headers
//! 2. rule split on horizontal rules (`---`)
//! 3. paragraph chunking into roughly [`TARGET_WORDS`]-word sections
//!
//! Paragraph chunking always applies, so segmenting never fails. Header and
//! rule lines inside fenced code are not treated as separators.

use crate::blocks::split_blocks;
use crate::classify::classify;
use crate::text::{is_fence, is_rule, slugify, title_from_chunk};
use crate::types::{Category, Module, Section};

/// Word budget for a paragraph chunk.
pub const TARGET_WORDS: usize = 500;

/// Title given to header-less text preceding the first header.
pub const PREAMBLE_TITLE: &str = "Introduction";

/// Subtitle carried by every imported module.
pub const IMPORTED_SUBTITLE: &str = "Imported content";

/// A segmentation strategy: `None` when it does not apply to the text.
pub type Strategy = fn(&str) -> Option<Vec<Section>>;

/// Strategies in the order they are tried.
pub const STRATEGIES: [(&str, Strategy); 3] = [
    ("header", split_on_headers),
    ("rule", split_on_rules),
    ("paragraph", chunk_paragraphs),
];

/// Segment pasted text into a module with an id derived from the title.
pub fn segment(text: &str, title: &str) -> Module {
    let slug = slugify(title);
    let id = if slug.is_empty() {
        "imported".to_string()
    } else {
        format!("imported-{}", slug)
    };
    segment_as(text, title, &id)
}

/// Segment pasted text into a module with an explicit id.
pub fn segment_as(text: &str, title: &str, module_id: &str) -> Module {
    let sections = segment_sections(text);

    let mut module = Module {
        id: module_id.to_string(),
        title: title.to_string(),
        number: 0,
        subtitle: IMPORTED_SUBTITLE.to_string(),
        sections,
        source: String::new(),
    };
    module.renumber();
    module
}

/// Run the strategy cascade and return the sections of the first match.
pub fn segment_sections(text: &str) -> Vec<Section> {
    for (name, strategy) in STRATEGIES {
        if let Some(sections) = strategy(text) {
            tracing::debug!(strategy = name, sections = sections.len(), "segmented document");
            return sections;
        }
    }
    // The paragraph strategy always applies.
    vec![Section::new(title_from_chunk(""), Category::General, 0)]
}

/// Build a section from a title and body, classifying `title + body`.
fn build_section(title: String, body: &str, classify_text: &str) -> Section {
    Section {
        title,
        category: classify(classify_text),
        blocks: split_blocks(body),
        order: 0,
    }
}

/// Header text for a level 1-3 ATX header line.
fn header_title(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    let title = rest.trim();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Strategy 1: break on level 1-3 headers.
///
/// Applies when the split yields more than one section, counting a non-empty
/// preamble as a section of its own.
pub fn split_on_headers(text: &str) -> Option<Vec<Section>> {
    let mut preamble: Vec<&str> = Vec::new();
    let mut chunks: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut in_code = false;

    for line in text.lines() {
        if is_fence(line) {
            in_code = !in_code;
        }
        let header = if in_code { None } else { header_title(line) };
        if let Some(title) = header {
            chunks.push((title, Vec::new()));
        } else if let Some((_, body)) = chunks.last_mut() {
            body.push(line);
        } else {
            preamble.push(line);
        }
    }

    let preamble = preamble.join("\n");
    let preamble = preamble.trim();
    let total = chunks.len() + usize::from(!preamble.is_empty());
    if chunks.is_empty() || total < 2 {
        return None;
    }

    let mut sections = Vec::with_capacity(total);
    if !preamble.is_empty() {
        sections.push(build_section(
            PREAMBLE_TITLE.to_string(),
            preamble,
            preamble,
        ));
    }
    for (title, body) in chunks {
        let body = body.join("\n");
        let classify_text = format!("{} {}", title, body);
        sections.push(build_section(title.to_string(), &body, &classify_text));
    }
    Some(sections)
}

/// Strategy 2: break on horizontal rules; each chunk is titled by its first line.
pub fn split_on_rules(text: &str) -> Option<Vec<Section>> {
    let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];
    let mut in_code = false;

    for line in text.lines() {
        if is_fence(line) {
            in_code = !in_code;
        }
        if !in_code && is_rule(line) {
            chunks.push(Vec::new());
        } else if let Some(current) = chunks.last_mut() {
            current.push(line);
        }
    }

    if chunks.len() < 2 {
        return None;
    }

    let sections: Vec<Section> = chunks
        .into_iter()
        .map(|lines| lines.join("\n"))
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            let chunk = chunk.trim();
            build_section(title_from_chunk(chunk), chunk, chunk)
        })
        .collect();
    (!sections.is_empty()).then_some(sections)
}

/// Strategy 3: accumulate blank-line separated paragraphs into chunks.
///
/// A chunk is closed when the next paragraph would push it past
/// [`TARGET_WORDS`]; the final chunk is always emitted.
pub fn chunk_paragraphs(text: &str) -> Option<Vec<Section>> {
    let paragraphs = paragraphs(text);
    let mut sections = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_words = 0;

    for para in paragraphs {
        let words = para.split_whitespace().count();
        if current_words + words > TARGET_WORDS && !current.is_empty() {
            sections.push(chunk_section(&current));
            current.clear();
            current_words = 0;
        }
        current.push(para);
        current_words += words;
    }

    sections.push(chunk_section(&current));
    Some(sections)
}

fn chunk_section(paragraphs: &[String]) -> Section {
    let text = paragraphs.join("\n\n");
    build_section(title_from_chunk(&text), &text, &text)
}

/// Blank-line separated paragraphs; blank lines inside fences do not split.
fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_code = false;

    for line in text.lines() {
        if is_fence(line) {
            in_code = !in_code;
        }
        if !in_code && line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}
