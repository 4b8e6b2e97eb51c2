//! Governance documents domain.
//!
//! Parses the Markdown policy documents into flat sections and answers
//! free-text searches and direct section lookups against them. Nothing
//! parsed is kept between calls: every operation starts from raw text.
//!
//! - `section` - heading-delimited section parsing
//! - `search` - term matching and snippet extraction
//! - `resolve` - lookup by section name, number or code
//! - `render` - text payloads with display limits applied
//! - `extract` - fixed KPI, budget, partition and criteria extracts
//! - `store` - raw text loading

mod error;
pub mod extract;
mod kind;
pub mod render;
pub mod resolve;
pub mod search;
pub mod section;
mod store;

pub use error::DocumentError;
pub use kind::DocumentKind;
pub use render::{render_resolution, render_search};
pub use resolve::{ClauseGroup, Resolution, ResolveRule, resolve, resolve_sections};
pub use search::{SearchResult, narrow_sections, search_sections};
pub use section::{Section, parse_sections};
pub use store::DocumentStore;

/// Load and parse a document in one step.
pub fn load_sections(
    store: &DocumentStore,
    kind: DocumentKind,
) -> Result<Vec<Section>, DocumentError> {
    let text = store.load(kind)?;
    Ok(parse_sections(&text, kind.has_metadata_block()))
}
