//! Normalization of `display_data` tool results into MIME bundles.
//!
//! Two payload shapes are accepted:
//!
//! * single payload: `{"mime_type": "text/html", "data": "<b>x</b>"}`
//! * full bundle: `{"data": {"text/latex": "...", "text/plain": "..."}}`,
//!   where `data` may also be a JSON-encoded string of that object.
//!
//! Either shape may carry a `metadata` object. The resulting bundle always
//! has a `text/plain` entry.

use ai_kernel_protocol::MimeBundle;
use ai_kernel_protocol::MimeValue;
use ai_kernel_protocol::mime::TEXT_PLAIN;
use ai_kernel_protocol::mime::json_to_text;
use serde_json::Map;
use serde_json::Value;

use crate::error::DisplayDataParseError;

/// A parsed `display_data` payload ready to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayDataOutput {
    pub bundle: MimeBundle,
    pub metadata: Map<String, Value>,
}

pub fn parse_display_data_output(
    output: &str,
) -> Result<DisplayDataOutput, DisplayDataParseError> {
    let Value::Object(mut payload) = serde_json::from_str::<Value>(output)? else {
        return Err(DisplayDataParseError::NotAnObject);
    };

    let metadata = match payload.remove("metadata") {
        Some(Value::Object(metadata)) => metadata,
        _ => Map::new(),
    };

    let mime_type = payload
        .get("mime_type")
        .and_then(Value::as_str)
        .map(|mime_type| mime_type.trim().to_string())
        .unwrap_or_default();

    if !mime_type.is_empty() {
        let data = payload
            .remove("data")
            .ok_or(DisplayDataParseError::MissingData)?;
        return Ok(DisplayDataOutput {
            bundle: single_mime_bundle(&mime_type, data),
            metadata,
        });
    }

    let candidate = match payload.remove("data") {
        Some(Value::String(encoded)) => parse_json_string(encoded),
        Some(other) => other,
        None => Value::Null,
    };
    let Value::Object(entries) = candidate else {
        return Err(DisplayDataParseError::NotABundle);
    };

    let mut bundle = normalize_entries(entries);
    if bundle.is_empty() {
        return Err(DisplayDataParseError::EmptyBundle);
    }
    if !bundle.contains(TEXT_PLAIN) {
        let fallback = derive_text_fallback(&bundle);
        bundle.insert(TEXT_PLAIN, fallback);
    }

    Ok(DisplayDataOutput { bundle, metadata })
}

fn single_mime_bundle(mime_type: &str, data: Value) -> MimeBundle {
    let value = normalize_mime_value(mime_type, data);
    let mut bundle = MimeBundle::new();
    if mime_type != TEXT_PLAIN {
        let fallback = value.to_text();
        bundle.insert(mime_type, value);
        bundle.insert(TEXT_PLAIN, fallback);
    } else {
        bundle.insert(mime_type, value);
    }
    bundle
}

fn normalize_entries(entries: Map<String, Value>) -> MimeBundle {
    entries
        .into_iter()
        .filter_map(|(raw_mime_type, value)| {
            let mime_type = raw_mime_type.trim();
            if mime_type.is_empty() {
                return None;
            }
            let value = normalize_mime_value(mime_type, value);
            Some((mime_type.to_string(), value))
        })
        .collect()
}

fn normalize_mime_value(mime_type: &str, value: Value) -> MimeValue {
    if is_json_mime_type(mime_type) {
        coerce_json_value(value)
    } else {
        coerce_value(value)
    }
}

/// JSON types keep structure; a string is decoded first when it holds JSON.
fn coerce_json_value(value: Value) -> MimeValue {
    match value {
        Value::String(encoded) => match parse_json_string(encoded) {
            Value::String(text) => MimeValue::Text(text),
            structured => MimeValue::Json(structured),
        },
        structured => MimeValue::Json(structured),
    }
}

fn coerce_value(value: Value) -> MimeValue {
    match value {
        Value::String(text) => MimeValue::Text(text),
        Value::Array(items) if items.iter().all(Value::is_string) => MimeValue::Lines(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(line) => Some(line),
                    _ => None,
                })
                .collect(),
        ),
        object @ Value::Object(_) => MimeValue::Json(object),
        other => MimeValue::Text(json_to_text(&other)),
    }
}

/// Prefer an existing `text/*` entry, otherwise the first entry.
fn derive_text_fallback(bundle: &MimeBundle) -> String {
    bundle
        .iter()
        .find(|(mime_type, _)| mime_type.starts_with("text/"))
        .or_else(|| bundle.iter().next())
        .map(|(_, value)| value.to_text())
        .unwrap_or_default()
}

fn parse_json_string(encoded: String) -> Value {
    serde_json::from_str(&encoded).unwrap_or(Value::String(encoded))
}

pub fn is_json_mime_type(mime_type: &str) -> bool {
    mime_type == "application/json" || mime_type.ends_with("+json")
}
