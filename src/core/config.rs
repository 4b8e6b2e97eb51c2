//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Governance documents configuration.
    pub documents: DocumentsConfig,

    /// PostgreSQL connection configuration.
    pub database: DatabaseConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the governance documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Directory holding the Markdown files.
    pub base_path: PathBuf,

    /// Reuse loaded text while the file's modification time is unchanged.
    pub cache: bool,

    /// How many results each response renders.
    pub limits: DisplayLimits,
}

/// Presentation limits for document tool responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLimits {
    /// Sections shown by a direct section lookup.
    pub section_results: usize,

    /// Sections shown by a search with `include_full_sections`.
    pub full_sections: usize,

    /// Titles and excerpts shown by a summary search.
    pub summary_items: usize,
}

/// Configuration for the PostgreSQL pool.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,

    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            section_results: 3,
            full_sections: 5,
            summary_items: 10,
        }
    }
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("static"),
            cache: false,
            limits: DisplayLimits::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: None,
            user: None,
            password: None,
            max_connections: 5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "cgov-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            documents: DocumentsConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_DB_HOST`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(with_timestamps) = env_flag("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = with_timestamps;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        // Documents
        if let Ok(path) = std::env::var("MCP_DOCS_PATH") {
            config.documents.base_path = PathBuf::from(path);
        }
        info!("Governance documents directory: {:?}", config.documents.base_path);

        if let Some(cache) = env_flag("MCP_DOCS_CACHE") {
            config.documents.cache = cache;
            info!("Document cache enabled: {}", cache);
        }

        let limits = &mut config.documents.limits;
        if let Some(n) = env_parse("MCP_SECTION_LIMIT") {
            limits.section_results = n;
        }
        if let Some(n) = env_parse("MCP_FULL_SECTION_LIMIT") {
            limits.full_sections = n;
        }
        if let Some(n) = env_parse("MCP_SUMMARY_LIMIT") {
            limits.summary_items = n;
        }

        // Database
        if let Ok(host) = std::env::var("MCP_DB_HOST") {
            config.database.host = host;
        }
        if let Some(port) = env_parse("MCP_DB_PORT") {
            config.database.port = port;
        }
        config.database.name = std::env::var("MCP_DB_NAME").ok();
        config.database.user = std::env::var("MCP_DB_USER").ok();
        config.database.password = std::env::var("MCP_DB_PASSWORD").ok();
        if let Some(max) = env_parse("MCP_DB_MAX_CONNECTIONS") {
            config.database.max_connections = max;
        }

        if config.database.name.is_none() {
            warn!("MCP_DB_NAME not set - database tools will use the server's default database");
        }

        config
    }
}

/// Parse a numeric environment variable, ignoring invalid values.
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

/// Read a boolean flag; anything other than `false`/`0` counts as true.
fn env_flag(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|v| v.to_lowercase() != "false" && v != "0")
}

/// Serializes every test that touches process environment variables.
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
