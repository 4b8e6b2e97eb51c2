//! PostgreSQL tools.
//!
//! - `query`: ad-hoc read-only SQL
//! - `schema`: table listing and column description

pub mod query;
pub mod schema;

pub use query::{QueryDatabaseParams, QueryDatabaseTool};
pub use schema::{DescribeTableParams, DescribeTableTool, ListTablesParams, ListTablesTool};
