//! Text rendering of search and lookup results.
//!
//! Truncation happens here and only here: the matcher and resolver always
//! return their complete result sets.

use super::kind::DocumentKind;
use super::resolve::Resolution;
use super::search::SearchResult;
use super::section::Section;
use crate::core::config::DisplayLimits;

/// Render a search result as the text payload of a search tool.
pub fn render_search(
    kind: DocumentKind,
    query: &str,
    filter: Option<&str>,
    result: &SearchResult<'_>,
    include_full_sections: bool,
    limits: &DisplayLimits,
) -> String {
    if result.is_empty() {
        let mut out = format!("No matches found for \"{query}\" in the {}.", kind.title());
        if let Some(filter) = filter {
            out.push_str(&format!(" (searched within: {filter})"));
        }
        return out;
    }

    let mut out = format!(
        "Found {} matching section(s) for \"{query}\":\n\n",
        result.matches.len()
    );

    if include_full_sections {
        for section in result.matches.iter().take(limits.full_sections) {
            out.push_str(&format!("## {}\n{}\n\n---\n\n", section.title, section.content));
        }
        if let Some(rest) = remaining(result.matches.len(), limits.full_sections) {
            out.push_str(&format!(
                "... and {rest} more sections. Refine your query for more specific results.\n"
            ));
        }
        return out;
    }

    out.push_str("### Matching Sections:\n");
    for section in result.matches.iter().take(limits.summary_items) {
        out.push_str(&format!("- {}\n", section.title));
    }
    if let Some(rest) = remaining(result.matches.len(), limits.summary_items) {
        out.push_str(&format!("  ... and {rest} more\n"));
    }

    out.push_str("\n### Relevant Excerpts:\n\n");
    for snippet in result.snippets.iter().take(limits.summary_items) {
        out.push_str(&format!("> {}\n\n", snippet.replace('\n', "\n> ")));
    }
    if let Some(rest) = remaining(result.snippets.len(), limits.summary_items) {
        out.push_str(&format!(
            "... and {rest} more excerpts. Use include_full_sections=true for complete text.\n"
        ));
    }

    out
}

/// Render a section lookup.
pub fn render_resolution(
    kind: DocumentKind,
    token: &str,
    resolution: &Resolution<'_>,
    limits: &DisplayLimits,
) -> String {
    match resolution {
        Resolution::Clauses(groups) => {
            let mut out = String::new();
            for group in groups {
                out.push_str(&format!("## Found in: {}\n\n", group.section.title));
                for clause in &group.clauses {
                    out.push_str(&format!("{clause}\n\n"));
                }
            }
            out
        }
        Resolution::Sections(sections) if sections.is_empty() => not_found(kind, token),
        Resolution::Sections(sections) => render_sections(sections, limits.section_results),
    }
}

fn render_sections(sections: &[&Section], limit: usize) -> String {
    let mut out = String::new();
    for section in sections.iter().take(limit) {
        out.push_str(&format!("## {}\n\n{}\n\n---\n\n", section.title, section.content));
    }
    if let Some(rest) = remaining(sections.len(), limit) {
        out.push_str(&format!("\n... and {rest} more matching sections.\n"));
    }
    out
}

fn not_found(kind: DocumentKind, token: &str) -> String {
    let hints = match kind {
        DocumentKind::Constitution => {
            "- Article names (e.g., \"Article I\", \"Article VII\")\n\
             - Tenets (e.g., \"Tenet 1\", \"Tenet 10\")\n\
             - Guardrail codes (e.g., \"PARAM-01\", \"TREASURY-01a\")\n\
             - General terms (e.g., \"Preamble\", \"DReps\", \"Constitutional Committee\")"
        }
        DocumentKind::Vision => {
            "- Pillar names (e.g., \"Pillar 1\", \"Infrastructure\", \"Governance\")\n\
             - Section codes (e.g., \"I.1\", \"A.2\", \"G.3\")\n\
             - Keywords (e.g., \"KPI\", \"Treasury\", \"SPO\", \"DeFi\")"
        }
        DocumentKind::VotingPrinciples => {
            "- Section numbers (e.g., \"2\", \"4.2\", \"5.1\")\n\
             - Keywords (e.g., \"Budget\", \"Front-Loaded\", \"Recognized Party\", \"Voting Decision\")\n\
             - Topics (e.g., \"NCL\", \"KPI\", \"Partition\")"
        }
    };
    format!(
        "Section \"{token}\" not found in the {}.\n\nTry searching for:\n{hints}",
        kind.title()
    )
}

/// How many items were cut off, if any.
fn remaining(total: usize, shown: usize) -> Option<usize> {
    (total > shown).then(|| total - shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::documents::{parse_sections, resolve, search_sections};

    fn numbered_document(count: usize) -> String {
        (1..=count)
            .map(|i| format!("## Topic {i}\nshared keyword line {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_no_matches_message() {
        let sections = parse_sections("# A\nnothing", false);
        let result = search_sections("treasury", &sections);
        let limits = DisplayLimits::default();

        let text = render_search(DocumentKind::Constitution, "treasury", None, &result, false, &limits);
        assert_eq!(text, "No matches found for \"treasury\" in the Cardano Constitution.");

        let text = render_search(
            DocumentKind::Vision,
            "treasury",
            Some("Pillar 3"),
            &result,
            false,
            &limits,
        );
        assert!(text.ends_with("(searched within: Pillar 3)"));
    }

    #[test]
    fn test_summary_truncates_titles_and_excerpts() {
        let sections = parse_sections(&numbered_document(12), false);
        let result = search_sections("keyword", &sections);
        let text = render_search(
            DocumentKind::VotingPrinciples,
            "keyword",
            None,
            &result,
            false,
            &DisplayLimits::default(),
        );

        assert!(text.starts_with("Found 12 matching section(s) for \"keyword\":\n\n"));
        assert!(text.contains("- Topic 10\n"));
        assert!(!text.contains("- Topic 11\n"));
        assert!(text.contains("  ... and 2 more\n"));
        assert!(text.contains("> ## Topic 1\n> shared keyword line 1\n\n"));
        assert!(text.contains("... and 2 more excerpts."));
    }

    #[test]
    fn test_full_sections_respect_limit() {
        let sections = parse_sections(&numbered_document(7), false);
        let result = search_sections("keyword", &sections);
        let text = render_search(
            DocumentKind::Constitution,
            "keyword",
            None,
            &result,
            true,
            &DisplayLimits::default(),
        );

        assert!(text.contains("## Topic 5\n## Topic 5\nshared keyword line 5\n\n---\n\n"));
        assert!(!text.contains("Topic 6\n"));
        assert!(text.contains("... and 2 more sections."));
    }

    #[test]
    fn test_limits_are_configurable() {
        let sections = parse_sections(&numbered_document(3), false);
        let result = search_sections("keyword", &sections);
        let limits = DisplayLimits {
            summary_items: 1,
            ..DisplayLimits::default()
        };
        let text = render_search(DocumentKind::Vision, "keyword", None, &result, false, &limits);
        assert!(text.contains("  ... and 2 more\n"));
    }

    #[test]
    fn test_resolution_sections_truncated() {
        let sections = parse_sections(&numbered_document(5), false);
        let resolution = resolve("topic", &sections, DocumentKind::VotingPrinciples);
        let text = render_resolution(
            DocumentKind::VotingPrinciples,
            "topic",
            &resolution,
            &DisplayLimits::default(),
        );

        assert!(text.starts_with("## Topic 1\n\n## Topic 1\nshared keyword line 1\n\n---\n\n"));
        assert!(!text.contains("## Topic 4"));
        assert!(text.ends_with("\n... and 2 more matching sections.\n"));
    }

    #[test]
    fn test_resolution_clauses() {
        let sections = parse_sections("## Guardrails\nPARAM-01 (Limit) Keep it bounded.", false);
        let resolution = resolve("PARAM-01", &sections, DocumentKind::Constitution);
        let text = render_resolution(
            DocumentKind::Constitution,
            "PARAM-01",
            &resolution,
            &DisplayLimits::default(),
        );
        assert_eq!(
            text,
            "## Found in: Guardrails\n\nPARAM-01 (Limit) Keep it bounded.\n\n"
        );
    }

    #[test]
    fn test_resolution_not_found() {
        let sections = parse_sections("# A\nbody", false);
        let resolution = resolve("Pillar 9", &sections, DocumentKind::Vision);
        let text = render_resolution(
            DocumentKind::Vision,
            "Pillar 9",
            &resolution,
            &DisplayLimits::default(),
        );
        assert!(text.starts_with(
            "Section \"Pillar 9\" not found in the Cardano Vision 2030 document."
        ));
        assert!(text.contains("Section codes"));
    }
}
