//! Cardano governance MCP server library.
//!
//! Exposes the Cardano Constitution, the Vision 2030 document and the
//! Voting Principles document as searchable MCP tools, next to read-only
//! SQL tools over a PostgreSQL governance database.
//!
//! # Architecture
//!
//! - **core**: configuration, the database pool, the MCP server handler
//!   and its transports
//! - **domains**: business logic
//!   - **documents**: section parsing, term search, section lookup and extracts
//!   - **tools**: the MCP tools built on top of documents and the database
//!
//! # Example
//!
//! ```rust,no_run
//! use cgov_mcp_server::core::{Config, Database, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let database = Database::connect_lazy(&config.database);
//!     let server = McpServer::new(config.clone(), database.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     database.close().await;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, McpServer};
