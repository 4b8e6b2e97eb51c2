//! The fixed set of governance documents served by this crate.

use serde::Serialize;
use std::fmt;

use super::resolve::ResolveRule;

/// A governance document known to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Constitution,
    Vision,
    VotingPrinciples,
}

impl DocumentKind {
    /// Every document, in catalog order.
    pub const ALL: [Self; 3] = [Self::Constitution, Self::Vision, Self::VotingPrinciples];

    /// Stable string key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Constitution => "constitution",
            Self::Vision => "vision",
            Self::VotingPrinciples => "voting-principles",
        }
    }

    /// File name inside the documents directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Constitution => "cardano-constitution.md",
            Self::Vision => "cardano-vision-2030.md",
            Self::VotingPrinciples => "vision-analysis-criteria.md",
        }
    }

    /// Human-readable name used in responses.
    pub fn title(self) -> &'static str {
        match self {
            Self::Constitution => "Cardano Constitution",
            Self::Vision => "Cardano Vision 2030 document",
            Self::VotingPrinciples => "Voting Principles document",
        }
    }

    /// Whether a leading `---` metadata block must be stripped before parsing.
    pub fn has_metadata_block(self) -> bool {
        matches!(self, Self::Vision)
    }

    /// Structured lookup rules tried after the plain title match.
    pub fn resolve_rules(self) -> &'static [ResolveRule] {
        match self {
            Self::Constitution => &[
                ResolveRule::NumberedMarker { keyword: "tenet" },
                ResolveRule::CodedIdentifier,
            ],
            Self::Vision => &[ResolveRule::PillarNumber, ResolveRule::LetteredCode],
            Self::VotingPrinciples => &[ResolveRule::NumberedHeading],
        }
    }

    /// Whether coded-identifier lookups return the inline clause rather
    /// than the whole section.
    pub fn extracts_clauses(self) -> bool {
        matches!(self, Self::Constitution)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_and_files_are_unique() {
        let keys: HashSet<_> = DocumentKind::ALL.iter().map(|k| k.key()).collect();
        let files: HashSet<_> = DocumentKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_only_vision_strips_metadata() {
        assert!(DocumentKind::Vision.has_metadata_block());
        assert!(!DocumentKind::Constitution.has_metadata_block());
        assert!(!DocumentKind::VotingPrinciples.has_metadata_block());
    }

    #[test]
    fn test_serializes_as_key() {
        let value = serde_json::to_value(DocumentKind::VotingPrinciples).unwrap();
        assert_eq!(value, serde_json::json!("voting-principles"));
        assert_eq!(DocumentKind::Vision.to_string(), "vision");
    }
}
