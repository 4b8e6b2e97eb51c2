//! MCP Server implementation and lifecycle management.
//!
//! [`McpServer`] implements the rmcp `ServerHandler` for the stdio
//! transport and exposes the same tool listing and dispatch to the HTTP
//! transport. Both paths go through one [`ToolRegistry`].

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::database::Database;
use crate::domains::tools::ToolRegistry;

const INSTRUCTIONS: &str = "Cardano governance MCP server. Search and quote the Cardano Constitution, \
the Vision 2030 document and the Voting Principles document, and run read-only SQL against the \
governance database.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server over an already constructed database pool.
    pub fn new(config: Config, database: Database) -> Self {
        let registry = Arc::new(ToolRegistry::new(&config.documents, database));
        Self {
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Instructions sent in the `initialize` response.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// All advertised tools.
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.list()
    }

    /// Run a tool. Failures come back as error-flagged results.
    pub async fn run_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        self.registry.call_tool(name, arguments).await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run_tool(&request.name, request.arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DatabaseConfig;

    #[tokio::test]
    async fn test_server_info() {
        let server = McpServer::new(
            Config::default(),
            Database::connect_lazy(&DatabaseConfig::default()),
        );
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "cgov-mcp");
        assert_eq!(server.name(), "cgov-mcp");
    }

    #[tokio::test]
    async fn test_tool_listing() {
        let server = McpServer::new(
            Config::default(),
            Database::connect_lazy(&DatabaseConfig::default()),
        );
        assert_eq!(server.tools().len(), 13);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let server = McpServer::new(
            Config::default(),
            Database::connect_lazy(&DatabaseConfig::default()),
        );
        let result = server.run_tool("nope", None).await;
        assert_eq!(result.is_error, Some(true));
    }
}
