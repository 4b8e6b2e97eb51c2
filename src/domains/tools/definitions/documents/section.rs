//! Direct section lookup tools.
//!
//! `get_constitution_section`, `get_vision_section` and
//! `get_voting_principles_section` resolve a name, number or code to the
//! sections it identifies.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::core::config::DisplayLimits;
use crate::domains::documents::{
    DocumentKind, DocumentStore, Resolution, load_sections, render_resolution, resolve,
};
use crate::domains::tools::{ToolError, ToolHandler, parse_arguments, text_result, tool_model};

/// Parameters for the section lookup tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetSectionParams {
    /// Name of the section to retrieve (e.g., 'Article I', 'Tenet 5', 'PARAM-01', 'Pillar 1', 'Budget Framework')
    pub section_name: String,
}

const CONSTITUTION_DESCRIPTION: &str = "Get a specific section of the Cardano Constitution by name. Useful for retrieving exact text of articles, tenets, or guardrails.

Available sections include:
- PREAMBLE
- ARTICLE I through ARTICLE VIII
- Section numbers (e.g., \"Section 1\", \"Section 2\")
- TENET 1 through TENET 10
- APPENDIX I: CARDANO BLOCKCHAIN GUARDRAILS
- APPENDIX II: SUPPORTING GUIDANCE
- Specific guardrail codes (e.g., \"PARAM-01\", \"TREASURY-01a\", \"HARDFORK-01\")";

const VISION_DESCRIPTION: &str = "Get a specific section of the Cardano Vision 2030 document by name. Useful for retrieving exact text of pillars, KPIs, or focus areas.

Available sections include:
- Executive Summary
- Core Key Performance Indicators (KPIs)
- Pillar 1: Infrastructure & Research Excellence
  - I.1. Scalability & Interoperability
  - I.2. Security & Resilience
- Pillar 2: Adoption & Utility
  - A.1. High-Value Verticals
  - A.2. Experience (Business & Consumer)
  - A.3. Developer Experience
- Pillar 3: Governance
  - G.1. Incentivized & Accessible Governance
  - G.2. Turnout-Aware Voting with Delegator Safeguard
  - G.3. Treasury Seasons
- Pillar 4: Community & Ecosystem Growth
  - C.1. Talent Acquisition & Retention
  - C.2. Global Engagement & Market Adoption
- Pillar 5: Ecosystem Sustainability & Resilience
  - E.1. Financial Stewardship & Tokenomics
  - E.2. SPO Incentives";

const VOTING_DESCRIPTION: &str = "Get a specific section of the Cardano Governance Voting Principles document by name.

Available sections include:
- 1. Overview
- 2. Budget Framework (NCL, Per-KPI Allocation)
- 3. The 9 Vision 2030 KPIs
- 4. Front-Loaded Funding Model (Rationale, 10-Partition Distribution)
- 5. Recognized Party Requirement (First 30% Gate, Definition, Collaboration Requirements)
- 6. Voting Decision Framework (Capability Filter, Weighted Criteria, Budget Alignment)
- 7. Annual Review & Adjustment
- 8. Summary Table: Budget by Year and KPI
- 9. Appendix: KPI Progress Calculation Examples";

/// Section lookup tool bound to one document.
pub struct GetSectionTool {
    kind: DocumentKind,
    store: DocumentStore,
    limits: DisplayLimits,
}

impl GetSectionTool {
    pub const CONSTITUTION: &'static str = "get_constitution_section";
    pub const VISION: &'static str = "get_vision_section";
    pub const VOTING_PRINCIPLES: &'static str = "get_voting_principles_section";

    pub fn new(kind: DocumentKind, store: DocumentStore, limits: DisplayLimits) -> Self {
        Self {
            kind,
            store,
            limits,
        }
    }

    #[instrument(skip_all, fields(document = %self.kind, section = %params.section_name))]
    pub fn execute(&self, params: &GetSectionParams) -> Result<CallToolResult, ToolError> {
        info!("Looking up section in {}", self.kind.title());

        let sections = load_sections(&self.store, self.kind).map_err(|e| {
            warn!("Failed to load document: {}", e);
            ToolError::execution_failed(format!("Error retrieving section: {e}"))
        })?;

        let resolution = resolve(&params.section_name, &sections, self.kind);
        match &resolution {
            Resolution::Clauses(groups) => debug!("Extracted clauses from {} section(s)", groups.len()),
            Resolution::Sections(found) => debug!("Resolved {} section(s)", found.len()),
        }

        Ok(text_result(render_resolution(
            self.kind,
            &params.section_name,
            &resolution,
            &self.limits,
        )))
    }
}

#[async_trait]
impl ToolHandler for GetSectionTool {
    fn name(&self) -> &'static str {
        match self.kind {
            DocumentKind::Constitution => Self::CONSTITUTION,
            DocumentKind::Vision => Self::VISION,
            DocumentKind::VotingPrinciples => Self::VOTING_PRINCIPLES,
        }
    }

    fn to_tool(&self) -> Tool {
        let description = match self.kind {
            DocumentKind::Constitution => CONSTITUTION_DESCRIPTION,
            DocumentKind::Vision => VISION_DESCRIPTION,
            DocumentKind::VotingPrinciples => VOTING_DESCRIPTION,
        };
        tool_model::<GetSectionParams>(self.name(), description)
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: GetSectionParams = parse_arguments(self.name(), arguments)?;
        self.execute(&params)
    }
}
