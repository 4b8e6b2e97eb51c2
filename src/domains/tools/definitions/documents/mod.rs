//! Governance document tools.
//!
//! - `search`: free-text search per document
//! - `section`: lookup by section name, number or code
//! - `extracts`: KPI, budget, partition and criteria tables

pub mod extracts;
pub mod search;
pub mod section;

pub use extracts::{ExtractKind, ExtractTool};
pub use search::{SearchDocumentTool, SearchParams, VisionSearchParams};
pub use section::{GetSectionParams, GetSectionTool};
