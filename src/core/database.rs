//! Read-only PostgreSQL access.
//!
//! A single [`Database`] is created at startup and handed to the tools that
//! need it. Each query borrows one pooled connection for its whole
//! duration; the connection goes back to the pool when it is dropped, on
//! every exit path. [`Database::close`] drains the pool at shutdown.

use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};

use super::config::DatabaseConfig;

const READ_ONLY_SESSION: &str = "SET SESSION CHARACTERISTICS AS TRANSACTION READ ONLY";

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised by database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The statement is not a plain read.
    #[error("Only SELECT queries are allowed. This is a read-only database connection.")]
    ReadOnlyViolation,

    /// Failure reported by the driver or the server.
    #[error("{0}")]
    Query(#[from] sqlx::Error),
}

/// Shared handle to the connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Build the pool without opening any connection yet.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port);
        if let Some(name) = &config.name {
            options = options.database(name);
        }
        if let Some(user) = &config.user {
            options = options.username(user);
        }
        if let Some(password) = &config.password {
            options = options.password(password);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(options);

        info!(
            "Database pool configured for {}:{} (max {} connections)",
            config.host, config.port, config.max_connections
        );
        Self { pool }
    }

    /// Run a read statement and return its rows as JSON objects.
    ///
    /// `params` bind to `$1`, `$2`, ... as text.
    #[instrument(skip_all)]
    pub async fn query_rows(&self, sql: &str, params: &[&str]) -> Result<Vec<Value>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(READ_ONLY_SESSION).execute(&mut *conn).await?;

        let wrapped = wrap_as_json(sql);
        let mut query = sqlx::query_scalar::<_, Value>(&wrapped);
        for param in params {
            query = query.bind(param.to_string());
        }
        let rows = query.fetch_one(&mut *conn).await?;

        let rows = match rows {
            Value::Array(rows) => rows,
            Value::Null => Vec::new(),
            other => vec![other],
        };
        debug!("Query returned {} row(s)", rows.len());
        Ok(rows)
    }

    /// Close every connection. Later queries fail.
    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

/// Reject anything that does not start with `SELECT` or `WITH`.
pub fn ensure_read_only(sql: &str) -> Result<(), DatabaseError> {
    let head = sql.trim_start().to_uppercase();
    if head.starts_with("SELECT") || head.starts_with("WITH") {
        Ok(())
    } else {
        Err(DatabaseError::ReadOnlyViolation)
    }
}

/// Wrap a statement so the server returns all rows as one JSON array.
fn wrap_as_json(sql: &str) -> String {
    let inner = sql.trim().trim_end_matches(';').trim_end();
    format!("SELECT COALESCE(json_agg(q), '[]'::json) FROM ({inner}\n) AS q")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_read_only() {
        assert!(ensure_read_only("SELECT 1").is_ok());
        assert!(ensure_read_only("  select * from proposals").is_ok());
        assert!(ensure_read_only("\nWITH t AS (SELECT 1) SELECT * FROM t").is_ok());
        assert!(matches!(
            ensure_read_only("DELETE FROM proposals"),
            Err(DatabaseError::ReadOnlyViolation)
        ));
        assert!(ensure_read_only("").is_err());
    }

    #[test]
    fn test_wrap_as_json() {
        assert_eq!(
            wrap_as_json(" SELECT id FROM dreps; "),
            "SELECT COALESCE(json_agg(q), '[]'::json) FROM (SELECT id FROM dreps\n) AS q"
        );
    }

    #[test]
    fn test_wrap_as_json_keeps_trailing_comment_closed() {
        let wrapped = wrap_as_json("SELECT id FROM proposals -- newest first");
        let comment_line = wrapped
            .lines()
            .find(|line| line.contains("--"))
            .unwrap();
        assert!(comment_line.ends_with("-- newest first"));
        assert!(wrapped.ends_with("\n) AS q"));
    }

    #[tokio::test]
    async fn test_close_lazy_pool() {
        let database = Database::connect_lazy(&DatabaseConfig::default());
        assert!(!database.is_closed());
        database.close().await;
        assert!(database.is_closed());
    }

    #[test]
    fn test_read_only_message() {
        assert_eq!(
            DatabaseError::ReadOnlyViolation.to_string(),
            "Only SELECT queries are allowed. This is a read-only database connection."
        );
    }
}
