use std::sync::LazyLock;

use regex_lite::Regex;
use serde_json::Value;

pub const EXECUTE_COMMAND_TOOL: &str = "execute_command";
pub const DISCOVER_COMMANDS_TOOL: &str = "discover_commands";

#[allow(clippy::expect_used)]
static COMMAND_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""commandId"\s*:\s*"([^"]+)""#).expect("valid regex"));

/// One-line description of a tool call shown next to the tool name on its
/// card. Returns an empty string when nothing useful can be extracted.
pub fn extract_tool_summary(tool_name: &str, input: &str) -> String {
    match serde_json::from_str::<Value>(input) {
        Ok(parsed) => match tool_name {
            EXECUTE_COMMAND_TOOL => command_id_from_value(&parsed, true)
                .or_else(|| command_id_from_text(input))
                .unwrap_or_default(),
            DISCOVER_COMMANDS_TOOL => query_label(&parsed).unwrap_or_default(),
            _ => String::new(),
        },
        Err(_) if tool_name == EXECUTE_COMMAND_TOOL => {
            command_id_from_text(input).unwrap_or_default()
        }
        Err(_) => String::new(),
    }
}

/// Looks for a string `commandId` on the value itself, inside a JSON-encoded
/// string, or (when `descend` is set) one level down.
fn command_id_from_value(value: &Value, descend: bool) -> Option<String> {
    match value {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(decoded @ Value::Object(_)) => command_id_from_value(&decoded, descend),
            _ => command_id_from_text(text),
        },
        Value::Object(map) => {
            if let Some(Value::String(command_id)) = map.get("commandId") {
                return Some(command_id.clone());
            }
            if !descend {
                return None;
            }
            map.values()
                .filter(|child| child.is_object() || child.is_string())
                .find_map(|child| command_id_from_value(child, false))
        }
        _ => None,
    }
}

fn command_id_from_text(text: &str) -> Option<String> {
    COMMAND_ID_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn query_label(parsed: &Value) -> Option<String> {
    let query = match parsed.get("query")? {
        Value::String(query) if !query.is_empty() => query.clone(),
        Value::Number(number) if number.as_f64().is_some_and(|n| n != 0.0) => number.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => return None,
    };
    Some(format!("query: \"{query}\""))
}
