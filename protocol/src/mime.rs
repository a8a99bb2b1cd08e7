//! MIME bundle types exchanged in display operations.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_MARKDOWN: &str = "text/markdown";
pub const TEXT_HTML: &str = "text/html";

/// Content stored under one MIME type.
///
/// Mirrors the notebook format: a string, a multi-line string split into a
/// list of strings, or structured JSON for JSON-flavoured types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MimeValue {
    Text(String),
    Lines(Vec<String>),
    Json(Value),
}

impl MimeValue {
    /// Plain-text rendering used when a `text/plain` fallback is needed.
    pub fn to_text(&self) -> String {
        match self {
            MimeValue::Text(text) => text.clone(),
            MimeValue::Lines(lines) => lines.concat(),
            MimeValue::Json(value) => json_to_text(value),
        }
    }
}

impl From<&str> for MimeValue {
    fn from(value: &str) -> Self {
        MimeValue::Text(value.to_string())
    }
}

impl From<String> for MimeValue {
    fn from(value: String) -> Self {
        MimeValue::Text(value)
    }
}

/// Text form of an arbitrary JSON value: strings verbatim, string arrays
/// joined, everything else pretty-printed.
pub fn json_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .concat(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Insertion-ordered mapping from MIME type to content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MimeBundle(IndexMap<String, MimeValue>);

impl MimeBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mime_type: impl Into<String>, value: impl Into<MimeValue>) {
        self.0.insert(mime_type.into(), value.into());
    }

    /// Builder-style [`MimeBundle::insert`].
    pub fn with(mut self, mime_type: impl Into<String>, value: impl Into<MimeValue>) -> Self {
        self.insert(mime_type, value);
        self
    }

    pub fn get(&self, mime_type: &str) -> Option<&MimeValue> {
        self.0.get(mime_type)
    }

    pub fn contains(&self, mime_type: &str) -> bool {
        self.0.contains_key(mime_type)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MimeValue)> {
        self.0.iter()
    }

    pub fn mime_types(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `text/plain` content, if present, as text.
    pub fn plain_text(&self) -> Option<String> {
        self.get(TEXT_PLAIN).map(MimeValue::to_text)
    }
}

impl FromIterator<(String, MimeValue)> for MimeBundle {
    fn from_iter<T: IntoIterator<Item = (String, MimeValue)>>(iter: T) -> Self {
        MimeBundle(iter.into_iter().collect())
    }
}
