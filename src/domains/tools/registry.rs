//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - Dispatch for tool calls from every transport
//! - Tool metadata for listing

use rmcp::model::{CallToolResult, JsonObject, Tool};
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::config::DocumentsConfig;
use crate::core::database::Database;
use crate::domains::documents::{DocumentKind, DocumentStore};

use super::definitions::{
    DescribeTableTool, ExtractKind, ExtractTool, GetSectionTool, ListTablesTool,
    QueryDatabaseTool, SearchDocumentTool,
};
use super::error::ToolError;
use super::handlers::{ToolHandler, error_result};

/// Tool registry - owns one handler per advertised tool.
///
/// Listing order is the registration order and never changes at runtime.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Register every tool against the given backends.
    pub fn new(documents: &DocumentsConfig, database: Database) -> Self {
        let store = DocumentStore::from_config(documents);
        let limits = documents.limits;

        let mut tools: Vec<Arc<dyn ToolHandler>> = vec![
            Arc::new(QueryDatabaseTool::new(database.clone())),
            Arc::new(ListTablesTool::new(database.clone())),
            Arc::new(DescribeTableTool::new(database)),
        ];

        for kind in DocumentKind::ALL {
            tools.push(Arc::new(SearchDocumentTool::new(kind, store.clone(), limits)));
            tools.push(Arc::new(GetSectionTool::new(kind, store.clone(), limits)));
        }

        for kind in ExtractKind::ALL {
            tools.push(Arc::new(ExtractTool::new(kind, store.clone())));
        }

        Self { tools }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn list(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.to_tool()).collect()
    }

    fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Dispatch a tool call.
    ///
    /// Never fails: unknown tools, bad arguments and execution failures all
    /// come back as error-flagged text results.
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        info!("Tool call: {}", name);

        let outcome = match self.get(name) {
            Some(tool) => tool.call(arguments.unwrap_or_default()).await,
            None => Err(ToolError::not_found(name)),
        };

        outcome.unwrap_or_else(|e| {
            warn!("Tool {} failed: {}", name, e);
            error_result(e.to_string())
        })
    }
}
