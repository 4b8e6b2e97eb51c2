//! Tool handler trait and result helpers.
//!
//! Every tool implements [`ToolHandler`]. The registry holds them as trait
//! objects, so the stdio and HTTP transports dispatch through the same code.

use async_trait::async_trait;
use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ToolError;

/// A single callable tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Name the tool is registered under.
    fn name(&self) -> &'static str;

    /// Metadata advertised in `tools/list`.
    fn to_tool(&self) -> Tool;

    /// Run the tool against raw call arguments.
    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError>;
}

/// Build the `Tool` model for a parameter type.
pub fn tool_model<P: JsonSchema + 'static>(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Deserialize call arguments into a tool's parameter struct.
pub fn parse_arguments<P: DeserializeOwned>(
    tool: &str,
    arguments: JsonObject,
) -> Result<P, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(tool, e.to_string()))
}

/// A successful plain-text result.
pub fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// An error-flagged plain-text result.
pub fn error_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(text.into())])
}

/// Rows as pretty JSON text, mirrored in `structuredContent`.
pub fn rows_result(rows: Vec<Value>) -> Result<CallToolResult, ToolError> {
    let text = serde_json::to_string_pretty(&rows)?;
    let row_count = rows.len();
    Ok(CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(serde_json::json!({
            "rows": rows,
            "row_count": row_count,
        })),
        is_error: Some(false),
        meta: None,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use rmcp::model::{CallToolResult, JsonObject, RawContent};

    /// Text of the first content item.
    pub fn result_text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    /// Arguments object from a `json!` literal.
    pub fn args(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("Expected an object, got {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Params {
        name: String,
        #[serde(default)]
        verbose: bool,
    }

    #[test]
    fn test_parse_arguments() {
        let params: Params =
            parse_arguments("demo", args(serde_json::json!({ "name": "x" }))).unwrap();
        assert_eq!(params.name, "x");
        assert!(!params.verbose);
    }

    #[test]
    fn test_parse_arguments_wrong_type() {
        let err = parse_arguments::<Params>("demo", args(serde_json::json!({ "name": 3 })))
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid arguments for demo:"));
    }

    #[test]
    fn test_tool_model_schema() {
        let tool = tool_model::<Params>("demo", "A demo tool");
        assert_eq!(tool.name, "demo");
        let properties = tool.input_schema.get("properties").unwrap();
        assert!(properties.get("name").is_some());
        assert!(properties.get("verbose").is_some());
    }

    #[test]
    fn test_rows_result() {
        let result = rows_result(vec![serde_json::json!({ "id": 1 })]).unwrap();
        assert_eq!(result.is_error, Some(false));
        assert!(result_text(&result).contains("\"id\": 1"));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["row_count"], 1);
        assert_eq!(structured["rows"][0]["id"], 1);
    }

    #[test]
    fn test_error_result_flagged() {
        let result = error_result("boom");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "boom");
    }
}
