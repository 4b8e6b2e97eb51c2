//! Tools domain module.
//!
//! Tools are the only capability this server exposes. Every tool implements
//! [`ToolHandler`] and is registered once in [`ToolRegistry`], which both
//! transports dispatch through.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations
//! - `handlers.rs` - The handler trait and result helpers
//! - `registry.rs` - Registration, listing and dispatch
//! - `error.rs` - Tool-specific error types

pub mod definitions;
mod error;
mod handlers;
mod registry;

pub use error::ToolError;
pub use handlers::*;
pub use registry::ToolRegistry;
