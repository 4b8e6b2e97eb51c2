//! Domains module containing business logic organized by bounded contexts.
//!
//! - `documents`: the governance document search core
//! - `tools`: MCP tools over documents and the database

pub mod documents;
pub mod tools;
