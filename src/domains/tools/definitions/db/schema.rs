//! Schema introspection tools backed by `information_schema`.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::database::Database;
use crate::domains::tools::{ToolError, ToolHandler, parse_arguments, rows_result, tool_model};

const LIST_TABLES_SQL: &str = "
    SELECT table_schema, table_name, table_type
    FROM information_schema.tables
    WHERE table_schema NOT IN ('pg_catalog', 'information_schema')
    ORDER BY table_schema, table_name";

const DESCRIBE_TABLE_SQL: &str = "
    SELECT column_name, data_type, character_maximum_length, is_nullable, column_default
    FROM information_schema.columns
    WHERE table_schema = $1 AND table_name = $2
    ORDER BY ordinal_position";

/// `list_tables` takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListTablesParams {}

/// Parameters for `describe_table`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DescribeTableParams {
    /// The name of the table to describe
    pub table_name: String,

    /// The schema name (defaults to 'public')
    #[serde(default = "default_schema")]
    pub schema_name: String,
}

fn default_schema() -> String {
    "public".to_string()
}

pub struct ListTablesTool {
    database: Database,
}

impl ListTablesTool {
    pub const NAME: &'static str = "list_tables";
    pub const DESCRIPTION: &'static str = "List all tables in the database with their schemas";

    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ToolHandler for ListTablesTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn to_tool(&self) -> Tool {
        tool_model::<ListTablesParams>(Self::NAME, Self::DESCRIPTION)
    }

    #[instrument(skip_all)]
    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let _: ListTablesParams = parse_arguments(Self::NAME, arguments)?;
        info!("Listing tables");
        let rows = self.database.query_rows(LIST_TABLES_SQL, &[]).await?;
        rows_result(rows)
    }
}

pub struct DescribeTableTool {
    database: Database,
}

impl DescribeTableTool {
    pub const NAME: &'static str = "describe_table";
    pub const DESCRIPTION: &'static str = "Get the schema/structure of a specific table including column names, types, and constraints";

    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ToolHandler for DescribeTableTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn to_tool(&self) -> Tool {
        tool_model::<DescribeTableParams>(Self::NAME, Self::DESCRIPTION)
    }

    #[instrument(skip_all)]
    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: DescribeTableParams = parse_arguments(Self::NAME, arguments)?;
        info!("Describing {}.{}", params.schema_name, params.table_name);
        let rows = self
            .database
            .query_rows(
                DESCRIBE_TABLE_SQL,
                &[params.schema_name.as_str(), params.table_name.as_str()],
            )
            .await?;
        rows_result(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::test_support::args;

    #[test]
    fn test_schema_defaults_to_public() {
        let params: DescribeTableParams =
            parse_arguments(DescribeTableTool::NAME, args(serde_json::json!({ "table_name": "dreps" })))
                .unwrap();
        assert_eq!(params.schema_name, "public");
    }

    #[test]
    fn test_describe_requires_table_name() {
        let err = parse_arguments::<DescribeTableParams>(
            DescribeTableTool::NAME,
            args(serde_json::json!({ "schema_name": "gov" })),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Invalid arguments for describe_table:"));
    }

    #[test]
    fn test_list_tables_accepts_empty_arguments() {
        assert!(parse_arguments::<ListTablesParams>(ListTablesTool::NAME, JsonObject::new()).is_ok());
    }

    #[test]
    fn test_introspection_queries_are_reads() {
        use crate::core::database::ensure_read_only;
        assert!(ensure_read_only(LIST_TABLES_SQL).is_ok());
        assert!(ensure_read_only(DESCRIBE_TABLE_SQL).is_ok());
    }
}
