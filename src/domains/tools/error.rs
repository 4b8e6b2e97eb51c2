//! Tool-specific error types.

use thiserror::Error;

use crate::core::database::DatabaseError;

/// Errors that can occur during tool operations.
///
/// None of these reach the protocol layer: the registry renders each one
/// as an error-flagged text result.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// The arguments did not match the tool's schema.
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    /// The tool ran but could not produce its payload.
    #[error("{0}")]
    ExecutionFailed(String),

    /// A database statement failed.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ToolError::not_found("nope").to_string(), "Unknown tool: nope");
        assert_eq!(
            ToolError::invalid_arguments("describe_table", "missing field `table_name`")
                .to_string(),
            "Invalid arguments for describe_table: missing field `table_name`"
        );
        assert_eq!(
            ToolError::from(DatabaseError::ReadOnlyViolation).to_string(),
            "Database error: Only SELECT queries are allowed. This is a read-only database connection."
        );
    }
}
