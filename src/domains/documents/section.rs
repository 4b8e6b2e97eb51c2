//! Markdown section parsing.
//!
//! A document is split on `\n` and cut into a flat, ordered list of
//! sections at every heading line (`#` to `####`). Text before the first
//! heading belongs to no section and is dropped.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// One to four `#`, whitespace, then the title text.
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,4})\s+(.+)$").expect("heading pattern is valid"));

const METADATA_DELIMITER: &str = "---";

/// A titled span of a document, from a heading line up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading text with surrounding whitespace removed.
    pub title: String,
    /// The heading line followed by every body line, joined with `\n`.
    pub content: String,
    /// Number of `#` characters in the heading (1-4).
    pub level: usize,
    /// 0-based index of the heading line in the source document.
    pub start_line: usize,
    /// 0-based index of the last body line, inclusive.
    pub end_line: usize,
}

/// Parse raw Markdown into sections, in document order.
///
/// With `skip_metadata_block`, a leading `---` delimited block is consumed
/// before parsing starts. Line indices stay relative to the whole text.
/// Any input is accepted: text without headings yields no sections.
pub fn parse_sections(text: &str, skip_metadata_block: bool) -> Vec<Section> {
    let lines: Vec<&str> = text.split('\n').collect();
    let body_start = if skip_metadata_block {
        metadata_block_len(&lines)
    } else {
        0
    };

    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for (index, line) in lines.iter().enumerate().skip(body_start) {
        if let Some(caps) = HEADING.captures(line) {
            if let Some(mut section) = current.take() {
                section.end_line = index - 1;
                sections.push(section);
            }

            current = Some(Section {
                title: caps[2].trim().to_string(),
                content: (*line).to_string(),
                level: caps[1].len(),
                start_line: index,
                end_line: index,
            });
        } else if let Some(section) = current.as_mut() {
            section.content.push('\n');
            section.content.push_str(line);
            section.end_line = index;
        }
    }

    if let Some(mut section) = current {
        section.end_line = lines.len() - 1;
        sections.push(section);
    }

    sections
}

/// Number of leading lines taken by a metadata block, or 0 when absent.
///
/// An unterminated block swallows the whole document.
fn metadata_block_len(lines: &[&str]) -> usize {
    match lines.first() {
        Some(first) if first.trim() == METADATA_DELIMITER => lines
            .iter()
            .skip(1)
            .position(|line| line.trim() == METADATA_DELIMITER)
            .map_or(lines.len(), |offset| offset + 2),
        _ => 0,
    }
}
