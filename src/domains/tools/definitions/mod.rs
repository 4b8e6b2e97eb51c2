//! Tool definitions module.
//!
//! One file per tool family:
//! - `db`: read-only PostgreSQL access
//! - `documents`: search, section lookup and extracts over the governance documents

pub mod db;
pub mod documents;

pub use db::{DescribeTableTool, ListTablesTool, QueryDatabaseTool};
pub use documents::{ExtractKind, ExtractTool, GetSectionTool, SearchDocumentTool};
