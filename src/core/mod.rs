//! Core module containing shared infrastructure components.
//!
//! Configuration, the database pool, the MCP server handler and the
//! transports that carry it.

pub mod config;
pub mod database;
pub mod server;
pub mod transport;

pub use config::Config;
pub use database::{Database, DatabaseError};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
