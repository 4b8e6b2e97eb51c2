//! Document-specific error types.

use std::path::PathBuf;
use thiserror::Error;

use super::kind::DocumentKind;

/// Errors that can occur while loading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The backing file could not be read.
    #[error("{} is unavailable at {}: {source}", .kind.title(), .path.display())]
    Unavailable {
        kind: DocumentKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    /// Create an "unavailable" error.
    pub fn unavailable(kind: DocumentKind, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unavailable {
            kind,
            path: path.into(),
            source,
        }
    }
}
