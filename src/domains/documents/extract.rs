//! Fixed extracts from the vision and voting principles documents.
//!
//! Each extract cuts the raw text from a known heading up to the next
//! marker, then optionally narrows the Markdown table rows inside it.

use super::section::parse_sections;

const VISION_KPI_START: &str = "## Core Key Performance Indicators (KPIs)";
const VISION_KPI_END: &str = "## Pillar 1";

const KPI_BUDGET_START: &str = "## 3. The 9 Vision 2030 KPIs";
const KPI_BUDGET_END: &str = "---";

const PARTITION_START: &str = "## 4. Front-Loaded Funding Model";
const PARTITION_END: &str = "## 5.";

const CRITERIA_START: &str = "## 6. Voting Decision Framework";
const CRITERIA_END: &str = "## 7.";

const KPI_COUNT: u32 = 9;

/// Text from `start` up to (not including) the first `end` after it.
///
/// `None` when either marker is missing.
fn block_between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = text.find(start)?;
    let body = from + start.len();
    let to = body + text[body..].find(end)?;
    Some(&text[from..to])
}

/// Vision 2030 KPI tables, optionally narrowed to one category.
pub fn vision_kpis(text: &str, category: Option<&str>) -> String {
    let Some(block) = block_between(text, VISION_KPI_START, VISION_KPI_END) else {
        return "Could not find KPI section in the vision document.".to_string();
    };

    let mut out = String::from("# Cardano Vision 2030 - Key Performance Indicators\n\n");

    let Some(category) = category else {
        out.push_str(block);
        return out;
    };

    let needle = category.to_lowercase();
    let mut kept = Vec::new();
    let mut in_table = false;

    for line in block.split('\n') {
        if line.starts_with('|') && line.contains("Area") {
            in_table = true;
            kept.push(line);
            continue;
        }
        if line.starts_with("| :") {
            kept.push(line);
            continue;
        }
        if in_table && line.starts_with('|') {
            if line.to_lowercase().contains(&needle) {
                kept.push(line);
            }
        } else if !line.starts_with('|') {
            in_table = false;
        }
    }

    if kept.len() > 2 {
        out.push_str(&format!("Filtered by category: {category}\n\n{}", kept.join("\n")));
    } else {
        out.push_str(&format!(
            "No KPIs found for category \"{category}\".\n\n\
             Available categories: Adoption, Reliability, Operational resilience, Revenue, Governance, Scalability\n\n\
             Showing all KPIs:\n\n{block}"
        ));
    }
    out
}

/// The nine KPIs and their budget allocation, optionally a single one.
pub fn voting_kpi_budgets(text: &str, kpi_number: Option<u32>) -> String {
    let Some(block) = block_between(text, KPI_BUDGET_START, KPI_BUDGET_END) else {
        return "Could not find KPI section in the voting principles document.".to_string();
    };

    let mut out = String::from("# Vision 2030 KPIs - Budget Allocations\n\n");

    match kpi_number.filter(|n| (1..=KPI_COUNT).contains(n)) {
        Some(number) => {
            let lines: Vec<&str> = block.split('\n').collect();
            let prefix = format!("| {number}");
            let rows: Vec<&str> = lines
                .iter()
                .copied()
                .filter(|line| line.starts_with(&prefix))
                .collect();

            if rows.is_empty() {
                out.push_str(&format!("KPI #{number} not found.\n"));
                return out;
            }

            out.push_str(&format!("## KPI #{number}\n\n"));
            if let Some(header) = lines.iter().find(|l| l.contains("| # ")) {
                out.push_str(&format!("{header}\n"));
            }
            if let Some(separator) = lines.iter().find(|l| l.starts_with("| ---")) {
                out.push_str(&format!("{separator}\n"));
            }
            out.push_str(&format!("{}\n\n", rows.join("\n")));
            out.push_str("**Budget Allocation:** 111.1M ADA over 5 years\n");
        }
        None => {
            out.push_str(block);
            out.push_str("\n**Total Budget:** 1,000M ADA across all 9 KPIs\n");
            out.push_str("**Per-KPI Allocation:** 111.1M ADA each\n");
        }
    }
    out
}

/// The front-loaded funding partition table, optionally narrowed.
pub fn funding_partitions(text: &str, partition: Option<&str>) -> String {
    let Some(block) = block_between(text, PARTITION_START, PARTITION_END) else {
        return "Could not find funding partition section in the voting principles document."
            .to_string();
    };

    let mut out = String::from("# Front-Loaded Funding Model\n\n");

    let Some(partition) = partition else {
        out.push_str(block);
        return out;
    };

    let needle = partition.to_lowercase();
    let first_thirty = needle.contains("first 30");
    let mut kept = Vec::new();
    let mut found_header = false;

    for line in block.split('\n') {
        if line.contains("Progress Partition") {
            found_header = true;
            kept.push(line);
            continue;
        }
        if line.starts_with("| ---") {
            kept.push(line);
            continue;
        }
        if found_header && line.starts_with('|') {
            let early_row =
                line.contains("0%") || line.contains("10%") || line.contains("20%");
            if line.to_lowercase().contains(&needle) || (first_thirty && early_row) {
                kept.push(line);
            }
        }
    }

    if kept.len() > 2 {
        out.push_str(&format!("Filtered for: {partition}\n\n{}\n", kept.join("\n")));
    } else {
        out.push_str(&format!(
            "No specific partition found for \"{partition}\". Showing full table:\n\n{block}"
        ));
    }
    out
}

/// The voting decision framework, optionally only the sections about one criterion.
pub fn voting_criteria(text: &str, criterion: Option<&str>) -> String {
    let Some(block) = block_between(text, CRITERIA_START, CRITERIA_END) else {
        return "Could not find voting decision framework in the voting principles document."
            .to_string();
    };

    let mut out = String::from("# Voting Decision Framework\n\n");

    let Some(criterion) = criterion else {
        out.push_str(block);
        return out;
    };

    let needle = criterion.to_lowercase();
    let sections = parse_sections(block, false);
    let matches: Vec<_> = sections
        .iter()
        .filter(|s| {
            s.title.to_lowercase().contains(&needle) || s.content.to_lowercase().contains(&needle)
        })
        .collect();

    if matches.is_empty() {
        out.push_str(&format!(
            "No specific criterion found for \"{criterion}\". Showing full framework:\n\n{block}"
        ));
    } else {
        for section in matches {
            out.push_str(&format!("## {}\n\n{}\n\n", section.title, section.content));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISION: &str = "\
---
title: Vision
---
## Executive Summary
text
## Core Key Performance Indicators (KPIs)
| Area | KPI | Target |
| :--- | :-- | :----- |
| Adoption | TVL | $3B |
| Reliability | Uptime | 99.98% |

| Area | KPI | Target |
| :--- | :-- | :----- |
| Governance | DRep participation | >70% |
## Pillar 1: Infrastructure
body";

    const VOTING: &str = "\
## 3. The 9 Vision 2030 KPIs
| # | KPI | Budget |
| 1 | TVL | 111.1M |
| 2 | Transactions | 111.1M |
---
## 4. Front-Loaded Funding Model
| Progress Partition | Share |
| --- | --- |
| 0-10% | 18% |
| 10-20% | 15% |
| 30-40% | 9% |
| 90-100% | 4% |
## 5. Recognized Party Requirement
text
## 6. Voting Decision Framework
### 6.1 Capability Filter
Team must show value created.
### 6.2 Weighted Criteria
KPI Alignment (35%)
Cost Efficiency (20%)
## 7. Annual Review
end";

    #[test]
    fn test_block_between() {
        assert_eq!(block_between("a START b END c", "START", "END"), Some("START b "));
        assert_eq!(block_between("a START b", "START", "END"), None);
        assert_eq!(block_between("END a START", "START", "END"), None);
    }

    #[test]
    fn test_vision_kpis_all() {
        let text = vision_kpis(VISION, None);
        assert!(text.starts_with("# Cardano Vision 2030 - Key Performance Indicators\n\n"));
        assert!(text.contains("| Adoption | TVL | $3B |"));
        assert!(!text.contains("Pillar 1"));
    }

    #[test]
    fn test_vision_kpis_by_category() {
        let text = vision_kpis(VISION, Some("governance"));
        assert!(text.contains("Filtered by category: governance"));
        assert!(text.contains("| Governance | DRep participation | >70% |"));
        assert!(!text.contains("Adoption"));
    }

    #[test]
    fn test_vision_kpis_unknown_category_shows_all() {
        let single_table = "\
## Core Key Performance Indicators (KPIs)
| Area | KPI | Target |
| :--- | :-- | :----- |
| Adoption | TVL | $3B |
## Pillar 1";
        let text = vision_kpis(single_table, Some("weather"));
        assert!(text.contains("No KPIs found for category \"weather\"."));
        assert!(text.contains("| Adoption | TVL | $3B |"));
    }

    #[test]
    fn test_vision_kpis_missing_section() {
        assert_eq!(
            vision_kpis("# Nothing here", None),
            "Could not find KPI section in the vision document."
        );
    }

    #[test]
    fn test_kpi_budgets_single() {
        let text = voting_kpi_budgets(VOTING, Some(2));
        assert!(text.contains("## KPI #2\n\n| # | KPI | Budget |\n| 2 | Transactions | 111.1M |\n\n"));
        assert!(text.ends_with("**Budget Allocation:** 111.1M ADA over 5 years\n"));
    }

    #[test]
    fn test_kpi_budgets_out_of_range_shows_all() {
        let text = voting_kpi_budgets(VOTING, Some(12));
        assert!(text.contains("| 1 | TVL | 111.1M |"));
        assert!(text.contains("**Total Budget:** 1,000M ADA across all 9 KPIs"));
    }

    #[test]
    fn test_kpi_budgets_missing_row() {
        let text = voting_kpi_budgets(VOTING, Some(7));
        assert!(text.contains("KPI #7 not found."));
    }

    #[test]
    fn test_funding_partitions_filtered() {
        let text = funding_partitions(VOTING, Some("30-40"));
        assert!(text.contains("Filtered for: 30-40"));
        assert!(text.contains("| 30-40% | 9% |"));
        assert!(!text.contains("| 90-100% | 4% |"));
    }

    #[test]
    fn test_funding_partitions_filtered_layout() {
        assert_eq!(
            funding_partitions(VOTING, Some("30-40")),
            "# Front-Loaded Funding Model\n\n\
             Filtered for: 30-40\n\n\
             | Progress Partition | Share |\n\
             | --- | --- |\n\
             | 30-40% | 9% |\n"
        );
        assert_eq!(
            voting_kpi_budgets(VOTING, Some(7)),
            "# Vision 2030 KPIs - Budget Allocations\n\nKPI #7 not found.\n"
        );
    }

    #[test]
    fn test_funding_partitions_first_thirty() {
        let text = funding_partitions(VOTING, Some("First 30%"));
        assert!(text.contains("| 0-10% | 18% |"));
        assert!(text.contains("| 10-20% | 15% |"));
    }

    #[test]
    fn test_funding_partitions_no_match_shows_table() {
        let text = funding_partitions(VOTING, Some("zzz"));
        assert!(text.contains("No specific partition found for \"zzz\"."));
        assert!(text.contains("| 90-100% | 4% |"));
        assert!(!text.contains("Recognized Party"));
    }

    #[test]
    fn test_voting_criteria_by_name() {
        let text = voting_criteria(VOTING, Some("efficiency"));
        assert!(text.contains("## 6.2 Weighted Criteria\n\n### 6.2 Weighted Criteria"));
        assert!(!text.contains("Capability Filter"));
    }

    #[test]
    fn test_voting_criteria_all() {
        let text = voting_criteria(VOTING, None);
        assert!(text.contains("### 6.1 Capability Filter"));
        assert!(!text.contains("Annual Review"));
    }
}
