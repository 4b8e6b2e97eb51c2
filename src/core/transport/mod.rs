//! Transport layer for the MCP server.
//!
//! This module provides two transport implementations:
//! - **STDIO**: Standard input/output, one long-lived client - feature: `stdio`
//! - **HTTP**: Stateless JSON-RPC over POST - feature: `http`
//!
//! Each transport handles the connection lifecycle and delegates
//! message processing to the MCP server handler.
//!
//! # Feature Flags
//!
//! - `stdio`: STDIO transport - minimal dependencies
//! - `http`: HTTP transport - adds axum, tower, tower-http

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
