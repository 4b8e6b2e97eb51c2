//! Raw document loading.
//!
//! By default every load goes back to disk. With caching enabled, text is
//! reused only while the file's modification time is unchanged.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;
use tracing::debug;

use super::error::DocumentError;
use super::kind::DocumentKind;
use crate::core::config::DocumentsConfig;

#[derive(Debug, Clone)]
struct CachedText {
    modified: SystemTime,
    text: Arc<str>,
}

/// Reads governance documents from a directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
    cache: Option<Arc<Mutex<HashMap<DocumentKind, CachedText>>>>,
}

impl DocumentStore {
    /// Create a store that always reads fresh from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: None,
        }
    }

    /// Create a store from configuration.
    pub fn from_config(config: &DocumentsConfig) -> Self {
        let store = Self::new(&config.base_path);
        if config.cache { store.with_cache() } else { store }
    }

    /// Enable modification-time keyed caching.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(Arc::new(Mutex::new(HashMap::new())));
        self
    }

    /// Directory the documents are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a document.
    pub fn path_for(&self, kind: DocumentKind) -> PathBuf {
        self.root.join(kind.file_name())
    }

    /// Load the raw text of a document.
    pub fn load(&self, kind: DocumentKind) -> Result<String, DocumentError> {
        let path = self.path_for(kind);

        let Some(cache) = &self.cache else {
            return read(kind, &path).map(|text| text.to_string());
        };

        let modified = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map_err(|e| DocumentError::unavailable(kind, &path, e))?;

        let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = cache.get(&kind) {
            if entry.modified == modified {
                debug!("Serving {} from cache", kind);
                return Ok(entry.text.to_string());
            }
        }

        let text = read(kind, &path)?;
        cache.insert(
            kind,
            CachedText {
                modified,
                text: text.clone(),
            },
        );
        Ok(text.to_string())
    }
}

fn read(kind: DocumentKind, path: &Path) -> Result<Arc<str>, DocumentError> {
    debug!("Reading {} from {}", kind, path.display());
    fs::read_to_string(path)
        .map(Arc::from)
        .map_err(|e| DocumentError::unavailable(kind, path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_doc(dir: &TempDir, kind: DocumentKind, text: &str) -> PathBuf {
        let path = dir.path().join(kind.file_name());
        fs::write(&path, text).unwrap();
        path
    }

    fn set_mtime(path: &Path, secs: u64) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_load_reads_file() {
        let dir = TempDir::new().unwrap();
        write_doc(&dir, DocumentKind::Constitution, "# Preamble\n");

        let store = DocumentStore::new(dir.path());
        assert_eq!(store.load(DocumentKind::Constitution).unwrap(), "# Preamble\n");
    }

    #[test]
    fn test_missing_document_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::new(dir.path());

        let err = store.load(DocumentKind::Vision).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Unavailable {
                kind: DocumentKind::Vision,
                ..
            }
        ));
        assert!(err.to_string().contains("cardano-vision-2030.md"));
    }

    #[test]
    fn test_default_store_always_fresh() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, DocumentKind::Vision, "# Old");
        set_mtime(&path, 1_000);

        let store = DocumentStore::new(dir.path());
        assert_eq!(store.load(DocumentKind::Vision).unwrap(), "# Old");

        fs::write(&path, "# New").unwrap();
        set_mtime(&path, 1_000);
        assert_eq!(store.load(DocumentKind::Vision).unwrap(), "# New");
    }

    #[test]
    fn test_cache_reuses_until_mtime_changes() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, DocumentKind::VotingPrinciples, "# First");
        set_mtime(&path, 1_000);

        let store = DocumentStore::new(dir.path()).with_cache();
        assert_eq!(store.load(DocumentKind::VotingPrinciples).unwrap(), "# First");

        // Same mtime: the cached text wins.
        fs::write(&path, "# Second").unwrap();
        set_mtime(&path, 1_000);
        assert_eq!(store.load(DocumentKind::VotingPrinciples).unwrap(), "# First");

        set_mtime(&path, 2_000);
        assert_eq!(store.load(DocumentKind::VotingPrinciples).unwrap(), "# Second");
    }

    #[test]
    fn test_from_config() {
        let config = DocumentsConfig {
            base_path: PathBuf::from("/srv/docs"),
            cache: false,
            ..DocumentsConfig::default()
        };
        let store = DocumentStore::from_config(&config);
        assert_eq!(
            store.path_for(DocumentKind::Constitution),
            PathBuf::from("/srv/docs/cardano-constitution.md")
        );
        assert!(store.cache.is_none());
    }
}
