//! Fixed extract tools: vision KPIs, KPI budgets, funding partitions and
//! voting criteria.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::domains::documents::{DocumentKind, DocumentStore, extract};
use crate::domains::tools::{ToolError, ToolHandler, parse_arguments, text_result, tool_model};

/// Parameters for `get_vision_kpis`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct VisionKpisParams {
    /// Optional: filter by KPI category (e.g., 'Adoption', 'Reliability', 'Governance', 'Revenue', 'Scalability')
    #[serde(default)]
    pub category: Option<String>,
}

/// Parameters for `get_voting_kpi_budgets`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct KpiBudgetsParams {
    /// Optional: specific KPI number (1-9) to retrieve details for
    #[serde(default)]
    pub kpi_number: Option<u32>,
}

/// Parameters for `get_funding_partitions`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FundingPartitionsParams {
    /// Optional: specific partition range to retrieve (e.g., '0-10', '30-40', 'first 30%')
    #[serde(default)]
    pub partition: Option<String>,
}

/// Parameters for `get_voting_criteria`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct VotingCriteriaParams {
    /// Optional: specific criterion to retrieve (e.g., 'capability', 'alignment', 'efficiency', 'risk')
    #[serde(default)]
    pub criterion: Option<String>,
}

/// Which extract a tool produces, with its filter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractKind {
    VisionKpis,
    KpiBudgets,
    FundingPartitions,
    VotingCriteria,
}

impl ExtractKind {
    pub const ALL: [ExtractKind; 4] = [
        Self::VisionKpis,
        Self::KpiBudgets,
        Self::FundingPartitions,
        Self::VotingCriteria,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::VisionKpis => "get_vision_kpis",
            Self::KpiBudgets => "get_voting_kpi_budgets",
            Self::FundingPartitions => "get_funding_partitions",
            Self::VotingCriteria => "get_voting_criteria",
        }
    }

    fn document(self) -> DocumentKind {
        match self {
            Self::VisionKpis => DocumentKind::Vision,
            _ => DocumentKind::VotingPrinciples,
        }
    }

    fn error_context(self) -> &'static str {
        match self {
            Self::VisionKpis => "Error retrieving KPIs",
            Self::KpiBudgets => "Error retrieving KPI budgets",
            Self::FundingPartitions => "Error retrieving funding partitions",
            Self::VotingCriteria => "Error retrieving voting criteria",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::VisionKpis => "Get the Cardano Vision 2030 Key Performance Indicators (KPIs) and their targets. Returns the core KPIs that measure Cardano's progress toward 2030 goals.

Core KPIs include:
- Total Value Locked (TVL): Target $3B
- Monthly Transactions: Target ≥27M
- Monthly Active Users (MAU): Target 1M
- Uptime: Target 99.98%
- Annual Protocol Revenue: Target ≥16M ada
- DRep Participation Rate: Target >70%
- Throughput Capacity: Target 3x current",
            Self::KpiBudgets => "Get the 9 Vision 2030 KPIs and their budget allocations from the Voting Principles document.

Each KPI receives 111.1M ADA over the 5-year period (2025-2030):
1. Total Value Locked (TVL): $200M → $3B
2. Monthly Transactions: 800k → ≥27M
3. Monthly Active Users (MAU): 100-300k → 1M
4. Monthly Uptime: 99.98%
5. DRep Voting Power Distribution: >22 DReps control 50%+1
6. Alternative Node Clients: 1 → ≥2
7. Annual Protocol Revenue: 3.5M → ≥16M ada
8. DRep Participation Rate: >70% active voting
9. Throughput Capacity: 300k → 900k tx/day (3x)",
            Self::FundingPartitions => "Get the front-loaded funding distribution model from the Voting Principles document.

The model divides each KPI's 111.1M ADA budget into 10 progress partitions:
- First 10% progress: 18% of budget (20M ADA) - 1.8x multiplier
- First 30% progress: 46% of budget (~51.1M ADA)
- Last 30% progress: 16% of budget (~17.8M ADA)
- Funding intensity ratio: First 10% gets 4.5× more than last 10%

This front-loading ensures early infrastructure investment with compounding returns.",
            Self::VotingCriteria => "Get the voting decision framework and evaluation criteria from the Voting Principles document.

The framework includes:
- **Preliminary Filter**: Team capability pass/fail check (value created ≥ budget requested)
- **Weighted Evaluation Criteria**:
  - KPI Alignment (35%): Does proposal advance Vision 2030 KPIs?
  - Measurable Impact (30%): Are deliverables quantifiable?
  - Cost Efficiency (20%): Is budget proportional to expected progress?
  - Risk Mitigation (15%): Are milestones/escrow/clawback in place?
- **Budget Alignment Checks**: Partition fit, recognized party requirement",
        }
    }
}

/// Extract tool over the raw document text.
pub struct ExtractTool {
    kind: ExtractKind,
    store: DocumentStore,
}

impl ExtractTool {
    pub fn new(kind: ExtractKind, store: DocumentStore) -> Self {
        Self { kind, store }
    }

    fn load(&self) -> Result<String, ToolError> {
        self.store.load(self.kind.document()).map_err(|e| {
            warn!("Failed to load document: {}", e);
            ToolError::execution_failed(format!("{}: {e}", self.kind.error_context()))
        })
    }
}

#[async_trait]
impl ToolHandler for ExtractTool {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn to_tool(&self) -> Tool {
        let (name, description) = (self.kind.name(), self.kind.description());
        match self.kind {
            ExtractKind::VisionKpis => tool_model::<VisionKpisParams>(name, description),
            ExtractKind::KpiBudgets => tool_model::<KpiBudgetsParams>(name, description),
            ExtractKind::FundingPartitions => {
                tool_model::<FundingPartitionsParams>(name, description)
            }
            ExtractKind::VotingCriteria => tool_model::<VotingCriteriaParams>(name, description),
        }
    }

    #[instrument(skip_all)]
    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let name = self.name();
        info!("{} called", name);

        let text = match self.kind {
            ExtractKind::VisionKpis => {
                let params: VisionKpisParams = parse_arguments(name, arguments)?;
                extract::vision_kpis(&self.load()?, params.category.as_deref())
            }
            ExtractKind::KpiBudgets => {
                let params: KpiBudgetsParams = parse_arguments(name, arguments)?;
                extract::voting_kpi_budgets(&self.load()?, params.kpi_number)
            }
            ExtractKind::FundingPartitions => {
                let params: FundingPartitionsParams = parse_arguments(name, arguments)?;
                extract::funding_partitions(&self.load()?, params.partition.as_deref())
            }
            ExtractKind::VotingCriteria => {
                let params: VotingCriteriaParams = parse_arguments(name, arguments)?;
                extract::voting_criteria(&self.load()?, params.criterion.as_deref())
            }
        };

        Ok(text_result(text))
    }
}
