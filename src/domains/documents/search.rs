//! Free-text term matching over parsed sections.

use serde::Serialize;
use std::collections::HashSet;

use super::section::Section;

/// Query terms of this length or shorter are ignored.
const MIN_TERM_CHARS: usize = 3;

/// Sections that matched a query, plus the excerpts around each hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult<'a> {
    /// Matching sections in document order.
    pub matches: Vec<&'a Section>,
    /// Unique excerpts in discovery order.
    pub snippets: Vec<String>,
}

impl SearchResult<'_> {
    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Split a query into lower-cased terms, dropping the short ones.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|term| term.chars().count() >= MIN_TERM_CHARS)
        .map(str::to_string)
        .collect()
}

/// Keep only the sections whose title or content mentions `filter`.
pub fn narrow_sections(sections: Vec<Section>, filter: &str) -> Vec<Section> {
    let filter = filter.to_lowercase();
    sections
        .into_iter()
        .filter(|s| {
            s.title.to_lowercase().contains(&filter) || s.content.to_lowercase().contains(&filter)
        })
        .collect()
}

/// Find every section containing any query term and extract snippets.
///
/// A query with no usable terms matches nothing.
pub fn search_sections<'a>(query: &str, sections: &'a [Section]) -> SearchResult<'a> {
    let terms = query_terms(query);

    let mut matches = Vec::new();
    let mut snippets = Vec::new();
    let mut seen = HashSet::new();

    for section in sections {
        let content = section.content.to_lowercase();
        let title = section.title.to_lowercase();

        let is_match = terms.iter().any(|t| content.contains(t.as_str()))
            || terms.iter().any(|t| title.contains(t.as_str()));
        if !is_match {
            continue;
        }

        matches.push(section);
        collect_snippets(&section.content, &terms, &mut seen, &mut snippets);
    }

    SearchResult { matches, snippets }
}

/// Take the line before and after each hit, skipping windows already seen
/// anywhere in this search.
fn collect_snippets(
    content: &str,
    terms: &[String],
    seen: &mut HashSet<String>,
    snippets: &mut Vec<String>,
) {
    let lines: Vec<&str> = content.split('\n').collect();

    for (index, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if !terms.iter().any(|t| lower.contains(t.as_str())) {
            continue;
        }

        let start = index.saturating_sub(1);
        let end = (index + 2).min(lines.len());
        let snippet = lines[start..end].join("\n").trim().to_string();

        if !snippet.is_empty() && seen.insert(snippet.clone()) {
            snippets.push(snippet);
        }
    }
}
