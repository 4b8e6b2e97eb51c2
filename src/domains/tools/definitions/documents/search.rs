//! Free-text search tools over the governance documents.
//!
//! One tool per document: `search_constitution`, `search_vision_2030` and
//! `search_voting_principles`. The vision variant names its filter `pillar`.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::core::config::DisplayLimits;
use crate::domains::documents::{
    DocumentKind, DocumentStore, load_sections, narrow_sections, render_search, search_sections,
};
use crate::domains::tools::{ToolError, ToolHandler, parse_arguments, text_result, tool_model};

/// Parameters for the constitution and voting principles searches.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Search query - can be keywords, phrases, or topics (e.g., 'treasury withdrawal', 'DRep voting threshold', 'front-loaded', 'recognized party')
    pub query: String,

    /// Optional: specific section to search within (e.g., 'Article I', 'Appendix I', 'Budget Framework', 'Voting Decision')
    #[serde(default)]
    pub section: Option<String>,

    /// If true, return full matching sections. If false (default), return only relevant snippets.
    #[serde(default)]
    pub include_full_sections: bool,
}

/// Parameters for the vision search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VisionSearchParams {
    /// Search query - can be keywords, phrases, or topics (e.g., 'TVL target', 'DeFi strategy', 'SPO incentives', 'governance', 'KPI')
    pub query: String,

    /// Optional: filter by pillar (e.g., 'Pillar 1', 'Infrastructure', 'Governance', 'Adoption')
    #[serde(default)]
    pub pillar: Option<String>,

    /// If true, return full matching sections. If false (default), return only relevant snippets.
    #[serde(default)]
    pub include_full_sections: bool,
}

impl From<VisionSearchParams> for SearchParams {
    fn from(params: VisionSearchParams) -> Self {
        Self {
            query: params.query,
            section: params.pillar,
            include_full_sections: params.include_full_sections,
        }
    }
}

const CONSTITUTION_DESCRIPTION: &str = "Search the Cardano Constitution for relevant text. The constitution contains:
- Preamble
- Article I: Cardano Blockchain Tenets (10 core tenets) and Guardrails
- Article II: The Cardano Blockchain Community
- Article III: Participatory and Decentralized Governance
- Article IV: The Cardano Blockchain Ecosystem Budget
- Article V: Delegated Representatives (DReps)
- Article VI: Stake Pool Operators (SPOs)
- Article VII: Constitutional Committee (CC)
- Article VIII: Amendment Process
- Appendix I: Cardano Blockchain Guardrails (detailed parameter guardrails)
- Appendix II: Supporting Guidance

Use this tool to find constitutional provisions, tenets, guardrails, governance rules, and other constitutional text.";

const VISION_DESCRIPTION: &str = "Search the Cardano Vision 2030 Strategic Framework document. The vision outlines Cardano's strategy to become \"The World's Operating System\" by 2030.

The document contains:
- Executive Summary with 4 key objectives
- Core KPIs (TVL, Monthly transactions, MAU, Uptime, Revenue, etc.)
- Pillar 1: Infrastructure & Research Excellence (Scalability, Security, L2, ZK)
- Pillar 2: Adoption & Utility (DeFi, RWA, Payments, Developer Experience)
- Pillar 3: Governance (DRep incentives, Turnout-aware voting, Treasury seasons)
- Pillar 4: Community & Ecosystem Growth (Talent, Global engagement)
- Pillar 5: Ecosystem Sustainability (Treasury management, SPO incentives)

Use this tool to find strategic objectives, KPI targets, pillar details, and specific focus areas.";

const VOTING_DESCRIPTION: &str = "Search the Cardano Governance Voting Principles 2025-2030 document. This document establishes voting principles for treasury funding decisions aligned with Vision 2030 KPIs.

The document contains:
- Budget Framework: 1,000M ADA over 5 years (200M NCL per year)
- The 9 Vision 2030 KPIs with budget allocations (111.1M ADA each)
- Front-Loaded Funding Model: 10 partitions with decreasing funding intensity
- Recognized Party Requirements for first 30% of KPI progress
- Voting Decision Framework: Capability filter and weighted evaluation criteria
- Annual Review & Adjustment mechanisms

Use this tool to find voting guidelines, budget allocations, KPI definitions, and decision-making frameworks.";

/// Search tool bound to one document.
pub struct SearchDocumentTool {
    kind: DocumentKind,
    store: DocumentStore,
    limits: DisplayLimits,
}

impl SearchDocumentTool {
    pub const CONSTITUTION: &'static str = "search_constitution";
    pub const VISION: &'static str = "search_vision_2030";
    pub const VOTING_PRINCIPLES: &'static str = "search_voting_principles";

    pub fn new(kind: DocumentKind, store: DocumentStore, limits: DisplayLimits) -> Self {
        Self {
            kind,
            store,
            limits,
        }
    }

    fn error_context(&self) -> &'static str {
        match self.kind {
            DocumentKind::Constitution => "Error searching constitution",
            DocumentKind::Vision => "Error searching vision document",
            DocumentKind::VotingPrinciples => "Error searching voting principles",
        }
    }

    /// Execute the search and render the text payload.
    #[instrument(skip_all, fields(document = %self.kind, query = %params.query))]
    pub fn execute(&self, params: &SearchParams) -> Result<CallToolResult, ToolError> {
        info!("Searching {}", self.kind.title());

        let mut sections = load_sections(&self.store, self.kind).map_err(|e| {
            warn!("Failed to load document: {}", e);
            ToolError::execution_failed(format!("{}: {e}", self.error_context()))
        })?;

        let filter = params.section.as_deref().filter(|f| !f.is_empty());
        if let Some(filter) = filter {
            sections = narrow_sections(sections, filter);
            debug!("{} section(s) within filter {:?}", sections.len(), filter);
        }

        let result = search_sections(&params.query, &sections);
        debug!(
            "{} matching section(s), {} snippet(s)",
            result.matches.len(),
            result.snippets.len()
        );

        Ok(text_result(render_search(
            self.kind,
            &params.query,
            filter,
            &result,
            params.include_full_sections,
            &self.limits,
        )))
    }
}

#[async_trait]
impl ToolHandler for SearchDocumentTool {
    fn name(&self) -> &'static str {
        match self.kind {
            DocumentKind::Constitution => Self::CONSTITUTION,
            DocumentKind::Vision => Self::VISION,
            DocumentKind::VotingPrinciples => Self::VOTING_PRINCIPLES,
        }
    }

    fn to_tool(&self) -> Tool {
        match self.kind {
            DocumentKind::Constitution => {
                tool_model::<SearchParams>(self.name(), CONSTITUTION_DESCRIPTION)
            }
            DocumentKind::Vision => tool_model::<VisionSearchParams>(self.name(), VISION_DESCRIPTION),
            DocumentKind::VotingPrinciples => {
                tool_model::<SearchParams>(self.name(), VOTING_DESCRIPTION)
            }
        }
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: SearchParams = match self.kind {
            DocumentKind::Vision => {
                parse_arguments::<VisionSearchParams>(self.name(), arguments)?.into()
            }
            _ => parse_arguments(self.name(), arguments)?,
        };
        self.execute(&params)
    }
}
