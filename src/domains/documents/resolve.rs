//! Direct section lookup by name, number or code.
//!
//! A section is selected when its title contains the token, or when one of
//! the document's structured rules recognises the token. Rules are tried
//! in order and the first one that reaches a decision wins.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::debug;

use super::kind::DocumentKind;
use super::section::Section;

static PILLAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:pillar\s*[0-9]|[0-9])$").expect("pillar pattern is valid"));

static LETTERED_CODE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z])\.([0-9])$").expect("lettered code pattern is valid"));

static NUMBERED_HEADING_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:section\s*[0-9]$|[0-9]\.?\s)").expect("numbered heading pattern is valid")
});

/// Tokens like `PARAM-01` or `TREASURY-01a`.
static STRICT_CODE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z]+-[0-9]+[a-z]?$").expect("strict code pattern is valid")
});

/// A document-specific way of recognising a lookup token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveRule {
    /// `<keyword> N` selects sections containing a bold `**<keyword> N**`.
    /// Once the token has this shape, no later rule is consulted.
    NumberedMarker { keyword: &'static str },
    /// `ABC-01` style codes, matched as a whole word with optional hyphens.
    CodedIdentifier,
    /// `Pillar N` or a bare digit, matched against `pillar N` in titles.
    PillarNumber,
    /// `X.N` codes, matched against titles.
    LetteredCode,
    /// `Section N` or `N. ...`, matched against titles starting with `N.`.
    NumberedHeading,
}

/// A rule bound to one concrete token.
#[derive(Debug)]
enum Matcher {
    ContentMarker(String),
    WholeWord(Regex),
    TitleContains(String),
    TitlePrefix(String),
}

impl ResolveRule {
    /// Bind the rule to a token, or `None` when the token has the wrong shape.
    fn bind(self, token: &str, token_lower: &str) -> Option<Matcher> {
        match self {
            Self::NumberedMarker { keyword } => {
                if !token_lower.starts_with(keyword) {
                    return None;
                }
                let pattern = format!(r"{}\s*([0-9]+)", regex::escape(keyword));
                let number = Regex::new(&pattern)
                    .ok()?
                    .captures(token_lower)?
                    .get(1)?
                    .as_str()
                    .to_string();
                Some(Matcher::ContentMarker(format!("**{keyword} {number}**")))
            }
            Self::CodedIdentifier => {
                let parts: Vec<String> = token.split('-').map(regex::escape).collect();
                let pattern = format!(r"\b{}\b", parts.join("-?"));
                match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                    Ok(re) => Some(Matcher::WholeWord(re)),
                    Err(e) => {
                        debug!("Skipping coded identifier match for {:?}: {}", token, e);
                        None
                    }
                }
            }
            Self::PillarNumber => PILLAR_TOKEN.is_match(token_lower).then(|| {
                let digits: String = token_lower.chars().filter(char::is_ascii_digit).collect();
                Matcher::TitleContains(format!("pillar {digits}"))
            }),
            Self::LetteredCode => LETTERED_CODE_TOKEN
                .captures(token_lower)
                .map(|caps| Matcher::TitleContains(format!("{}.{}", &caps[1], &caps[2]))),
            Self::NumberedHeading => NUMBERED_HEADING_TOKEN.is_match(token_lower).then(|| {
                let digits: String = token_lower.chars().filter(char::is_ascii_digit).collect();
                Matcher::TitlePrefix(format!("{digits}."))
            }),
        }
    }
}

impl Matcher {
    /// `Some(decision)` ends the search for this section, `None` moves on.
    fn decide(&self, section: &Section, title_lower: &str) -> Option<bool> {
        match self {
            Self::ContentMarker(marker) => Some(section.content.to_lowercase().contains(marker)),
            Self::WholeWord(re) => re.is_match(&section.content).then_some(true),
            Self::TitleContains(needle) => title_lower.contains(needle.as_str()).then_some(true),
            Self::TitlePrefix(prefix) => title_lower.starts_with(prefix.as_str()).then_some(true),
        }
    }
}

/// Inline clauses for a coded identifier, grouped by the section they were found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseGroup<'a> {
    pub section: &'a Section,
    pub clauses: Vec<String>,
}

/// Outcome of a section lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Only the matching clauses of each section.
    Clauses(Vec<ClauseGroup<'a>>),
    /// Whole sections, possibly none.
    Sections(Vec<&'a Section>),
}

/// Every section the token identifies, in document order.
pub fn resolve_sections<'a>(
    token: &str,
    sections: &'a [Section],
    kind: DocumentKind,
) -> Vec<&'a Section> {
    let token_lower = token.to_lowercase();
    let matchers: Vec<Matcher> = kind
        .resolve_rules()
        .iter()
        .filter_map(|rule| rule.bind(token, &token_lower))
        .collect();

    sections
        .iter()
        .filter(|section| {
            let title_lower = section.title.to_lowercase();
            if title_lower.contains(&token_lower) {
                return true;
            }
            matchers
                .iter()
                .find_map(|m| m.decide(section, &title_lower))
                .unwrap_or(false)
        })
        .collect()
}

/// Pull `<CODE> (<label>) <text>` clauses for a strict code token.
///
/// Returns an empty list when the token is not a strict code or no section
/// carries the clause inline.
pub fn extract_clauses<'a>(token: &str, matches: &[&'a Section]) -> Vec<ClauseGroup<'a>> {
    if !STRICT_CODE_TOKEN.is_match(token) {
        return Vec::new();
    }

    let pattern = format!(
        r"{}[a-z]?\s+\([^)]+\)\s+[^\n]+",
        regex::escape(&token.to_uppercase())
    );
    let Ok(clause) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        return Vec::new();
    };

    matches
        .iter()
        .filter_map(|section| {
            let clauses: Vec<String> = clause
                .find_iter(&section.content)
                .map(|m| m.as_str().to_string())
                .collect();
            (!clauses.is_empty()).then_some(ClauseGroup { section, clauses })
        })
        .collect()
}

/// Resolve a token, narrowing to inline clauses where the document supports it.
pub fn resolve<'a>(token: &str, sections: &'a [Section], kind: DocumentKind) -> Resolution<'a> {
    let matches = resolve_sections(token, sections, kind);
    debug!("Resolved {:?} to {} section(s) in {}", token, matches.len(), kind);

    if kind.extracts_clauses() {
        let groups = extract_clauses(token, &matches);
        if !groups.is_empty() {
            return Resolution::Clauses(groups);
        }
    }

    Resolution::Sections(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::documents::parse_sections;

    const CONSTITUTION: &str = "\
# PREAMBLE
We the community.
## ARTICLE I
### Section 1
**Tenet 1** Transactions shall not be censored.
**Tenet 10** Fees shall be predictable.
### Section 2
**Tenet 5** Governance is open.
# APPENDIX I
## Parameters
PARAM-01 (Limit) Parameters must stay within bounds.
PARAM-01a (Extra) Additional bound.
TREASURY-01a (Withdrawals) Withdrawals require approval.
## Other
See PARAM01 for details.";

    fn titles<'a>(sections: &[&'a Section]) -> Vec<&'a str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_title_substring_match() {
        let sections = parse_sections(CONSTITUTION, false);
        let found = resolve_sections("article i", &sections, DocumentKind::Constitution);
        assert_eq!(titles(&found), vec!["ARTICLE I"]);
    }

    #[test]
    fn test_tenet_marker_is_exact() {
        let sections = parse_sections(CONSTITUTION, false);
        let found = resolve_sections("Tenet 1", &sections, DocumentKind::Constitution);
        assert_eq!(titles(&found), vec!["Section 1"]);

        let found = resolve_sections("TENET5", &sections, DocumentKind::Constitution);
        assert_eq!(titles(&found), vec!["Section 2"]);
    }

    #[test]
    fn test_coded_identifier_hyphen_optional() {
        let sections = parse_sections(CONSTITUTION, false);
        let found = resolve_sections("PARAM-01", &sections, DocumentKind::Constitution);
        assert_eq!(titles(&found), vec!["Parameters", "Other"]);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let sections = parse_sections(CONSTITUTION, false);
        let found = resolve_sections("(Limit", &sections, DocumentKind::Constitution);
        assert!(found.is_empty());
    }

    #[test]
    fn test_clause_extraction_for_strict_code() {
        let sections = parse_sections(CONSTITUTION, false);
        let Resolution::Clauses(groups) = resolve("PARAM-01", &sections, DocumentKind::Constitution)
        else {
            panic!("expected clause extraction");
        };

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].section.title, "Parameters");
        assert_eq!(
            groups[0].clauses,
            vec![
                "PARAM-01 (Limit) Parameters must stay within bounds.".to_string(),
                "PARAM-01a (Extra) Additional bound.".to_string(),
            ]
        );
    }

    #[test]
    fn test_clause_extraction_lowercase_token() {
        let sections = parse_sections(CONSTITUTION, false);
        let Resolution::Clauses(groups) =
            resolve("treasury-01a", &sections, DocumentKind::Constitution)
        else {
            panic!("expected clause extraction");
        };
        assert_eq!(
            groups[0].clauses,
            vec!["TREASURY-01a (Withdrawals) Withdrawals require approval.".to_string()]
        );
    }

    #[test]
    fn test_falls_back_to_sections_without_clause() {
        let text = "# Guardrails\nHARDFORK-01 is discussed here without a label.";
        let sections = parse_sections(text, false);
        let resolution = resolve("HARDFORK-01", &sections, DocumentKind::Constitution);
        assert!(
            matches!(resolution, Resolution::Sections(ref found) if titles(found) == vec!["Guardrails"])
        );
    }

    #[test]
    fn test_vision_pillar_and_code() {
        let text = "---\nkind: vision\n---\n## Pillar 1: Infrastructure\n### I.1. Scalability\n## Pillar 2: Adoption\n### A.2. Experience";
        let sections = parse_sections(text, true);

        let found = resolve_sections("pillar  2", &sections, DocumentKind::Vision);
        assert_eq!(titles(&found), vec!["Pillar 2: Adoption"]);

        // A bare digit also hits every title containing it.
        let found = resolve_sections("1", &sections, DocumentKind::Vision);
        assert_eq!(titles(&found), vec!["Pillar 1: Infrastructure", "I.1. Scalability"]);

        let found = resolve_sections("Pillar1", &sections, DocumentKind::Vision);
        assert_eq!(titles(&found), vec!["Pillar 1: Infrastructure"]);

        let found = resolve_sections("a.2", &sections, DocumentKind::Vision);
        assert_eq!(titles(&found), vec!["A.2. Experience"]);
    }

    #[test]
    fn test_non_ascii_digits_are_not_numbers() {
        let text = "## Pillar 1: Infrastructure\nx\n## Pillar 2: Adoption\ny";
        let sections = parse_sections(text, false);
        assert!(resolve_sections("\u{0663}", &sections, DocumentKind::Vision).is_empty());
        assert!(resolve_sections("pillar \u{0663}", &sections, DocumentKind::Vision).is_empty());

        let voting = parse_sections("## 3. Criteria\nz", false);
        assert!(
            resolve_sections("Section \u{0663}", &voting, DocumentKind::VotingPrinciples)
                .is_empty()
        );
    }

    #[test]
    fn test_vision_does_not_use_coded_identifiers() {
        let text = "## Pillar 3\nKPI-01 target";
        let sections = parse_sections(text, true);
        assert!(resolve_sections("KPI-01", &sections, DocumentKind::Vision).is_empty());
    }

    #[test]
    fn test_voting_numbered_heading() {
        let text = "## 1. Overview\nintro\n## 2. Budget Framework\nNCL\n## 12. Later\nx";
        let sections = parse_sections(text, false);

        let found = resolve_sections("Section 2", &sections, DocumentKind::VotingPrinciples);
        assert_eq!(titles(&found), vec!["2. Budget Framework"]);

        let found = resolve_sections("budget", &sections, DocumentKind::VotingPrinciples);
        assert_eq!(titles(&found), vec!["2. Budget Framework"]);
    }

    #[test]
    fn test_unknown_token_matches_nothing() {
        let sections = parse_sections(CONSTITUTION, false);
        let resolution = resolve("nonexistent", &sections, DocumentKind::Constitution);
        assert_eq!(resolution, Resolution::Sections(Vec::new()));
    }
}
