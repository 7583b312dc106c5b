//! Small markdown text helpers shared by the parse paths.

/// Maximum length of a title derived from chunk text.
pub const MAX_TITLE_CHARS: usize = 80;

/// True for a fenced-code delimiter line (three backticks, optionally indented).
pub fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// True for a horizontal rule made of three or more dashes.
pub fn is_rule(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

/// Language tag following an opening fence, if any.
pub fn fence_language(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix("```")?;
    let tag: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if tag.is_empty() {
        None
    } else {
        Some(tag)
    }
}

/// Strip surrounding header and emphasis markup from a line.
pub fn strip_markup(line: &str) -> &str {
    line.trim()
        .trim_matches('#')
        .trim()
        .trim_matches('*')
        .trim()
}

/// Truncate to at most `max` characters, never splitting a character.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Derive a section title from the first line of a chunk.
pub fn title_from_chunk(chunk: &str) -> String {
    let first = chunk.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let title = truncate_chars(strip_markup(first), MAX_TITLE_CHARS).trim();
    if title.is_empty() {
        "Untitled".to_string()
    } else {
        title.to_string()
    }
}

/// Lower-case slug with runs of non-alphanumerics collapsed to `-`.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Collapse whitespace and lower-case, for comparing prompts.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
