//! The `display_data` tool offered to the agent. Its completion is
//! intercepted by the dispatcher and shown as a rich MIME output instead of a
//! tool card.

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

pub const DISPLAY_DATA_TOOL_NAME: &str = "display_data";

const STANDARD_TYPES_HINT: &str =
    "Use standard MIME types (e.g., application/json, text/html, image/png, application/geo+json).";

/// Tool definition as registered with the agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: String,
    pub parameters: Value,
}

pub fn display_data_tool(mime_types: &[&str]) -> ToolDefinition {
    let available = if mime_types.is_empty() {
        STANDARD_TYPES_HINT.to_string()
    } else {
        format!("Available MIME types: {}", mime_types.join(", "))
    };

    let description = format!(
        "Display rich data using the notebook's MIME renderers. You can provide either: \
         (1) a single payload with \"mime_type\" + \"data\", or (2) a full Jupyter MIME bundle \
         in \"data\" (mapping MIME types to values). Supports standard types like \
         application/json, text/html, text/latex, image/png, and custom application/vnd.* types. \
         {available}"
    );

    let metadata = json!({
        "type": "object",
        "description": "Optional metadata for the MIME renderer.",
        "additionalProperties": true
    });
    let parameters = json!({
        "anyOf": [
            {
                "type": "object",
                "properties": {
                    "mime_type": {
                        "type": "string",
                        "description": "MIME type of the payload, e.g. text/html."
                    },
                    "data": {
                        "description": "Payload for the MIME type: a string, or structured JSON for JSON types."
                    },
                    "metadata": metadata.clone()
                },
                "required": ["mime_type", "data"]
            },
            {
                "type": "object",
                "properties": {
                    "data": {
                        "type": "object",
                        "description": "MIME bundle mapping MIME types to values.",
                        "additionalProperties": true
                    },
                    "metadata": metadata
                },
                "required": ["data"]
            }
        ]
    });

    ToolDefinition {
        name: DISPLAY_DATA_TOOL_NAME,
        description,
        parameters,
    }
}

/// Result returned to the agent when it calls `display_data`. The payload is
/// echoed back so the kernel can render it from the tool completion.
pub fn execute_display_data(input: &Value) -> Value {
    let mut result = Map::new();
    result.insert("displayed".to_string(), Value::Bool(true));
    if let Some(mime_type) = input.get("mime_type").and_then(Value::as_str) {
        result.insert("mime_type".to_string(), Value::String(mime_type.to_string()));
    }
    result.insert(
        "data".to_string(),
        input.get("data").cloned().unwrap_or(Value::Null),
    );
    result.insert(
        "metadata".to_string(),
        input
            .get("metadata")
            .filter(|metadata| metadata.is_object())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())),
    );
    Value::Object(result)
}
