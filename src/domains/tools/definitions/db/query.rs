//! Ad-hoc read-only SQL tool.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::core::database::{Database, ensure_read_only};
use crate::domains::tools::{
    ToolError, ToolHandler, error_result, parse_arguments, rows_result, tool_model,
};

/// Parameters for `query_database`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryDatabaseParams {
    /// The SQL SELECT query to execute
    pub sql: String,
}

/// Runs a caller-supplied `SELECT` or `WITH` statement.
pub struct QueryDatabaseTool {
    database: Database,
}

impl QueryDatabaseTool {
    pub const NAME: &'static str = "query_database";

    pub const DESCRIPTION: &'static str = "Execute a read-only SQL query against the PostgreSQL database. Use this to search and retrieve information.";

    pub fn new(database: Database) -> Self {
        Self { database }
    }

    #[instrument(skip_all)]
    pub async fn execute(&self, params: &QueryDatabaseParams) -> Result<CallToolResult, ToolError> {
        info!("Query tool called");

        if let Err(e) = ensure_read_only(&params.sql) {
            warn!("Rejected statement: {}", e);
            return Ok(error_result(format!("Error: {e}")));
        }

        let rows = self.database.query_rows(&params.sql, &[]).await?;
        rows_result(rows)
    }
}

#[async_trait]
impl ToolHandler for QueryDatabaseTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn to_tool(&self) -> Tool {
        tool_model::<QueryDatabaseParams>(Self::NAME, Self::DESCRIPTION)
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: QueryDatabaseParams = parse_arguments(Self::NAME, arguments)?;
        self.execute(&params).await
    }
}
