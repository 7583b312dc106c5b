//! Splits a span of markdown into ordered prose and code blocks.

use crate::text::{fence_language, is_fence};
use crate::types::Block;

/// Split text into `text` and `code` blocks in source order.
///
/// Fence delimiter lines are dropped from code content. A fence that is never
/// closed is kept as literal prose. Blank segments produce no block.
pub fn split_blocks(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut prose: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if !is_fence(line) {
            prose.push(line);
            i += 1;
            continue;
        }

        let close = lines[i + 1..].iter().position(|l| is_fence(l));
        match close {
            Some(offset) => {
                let end = i + 1 + offset;
                flush_prose(&mut prose, &mut blocks);
                let code = trim_blank_lines(&lines[i + 1..end].join("\n"));
                if !code.is_empty() {
                    blocks.push(Block::code(code, fence_language(line)));
                }
                i = end + 1;
            }
            None => {
                prose.extend_from_slice(&lines[i..]);
                break;
            }
        }
    }

    flush_prose(&mut prose, &mut blocks);
    blocks
}

fn flush_prose(prose: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    let content = prose.join("\n");
    prose.clear();
    let content = content.trim();
    if !content.is_empty() {
        blocks.push(Block::text(content));
    }
}

/// Drop leading blank lines and trailing whitespace, keeping indentation.
pub(crate) fn trim_blank_lines(code: &str) -> String {
    let start = code
        .lines()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(0);
    code.lines()
        .skip(start)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}
