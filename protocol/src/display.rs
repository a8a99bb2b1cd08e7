use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::mime::MimeBundle;

/// Payload of a `display_data` / `update_display_data` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayContent {
    pub data: MimeBundle,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub transient: Transient,
}

impl DisplayContent {
    pub fn new(display_id: impl Into<String>, data: MimeBundle) -> Self {
        Self {
            data,
            metadata: Map::new(),
            transient: Transient {
                display_id: display_id.into(),
            },
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn display_id(&self) -> &str {
        &self.transient.display_id
    }
}

/// Fields that address the display but are not persisted with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transient {
    pub display_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamName {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamContent {
    pub name: StreamName,
    pub text: String,
}

/// One message the kernel sends to its host while executing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg_type", content = "content", rename_all = "snake_case")]
pub enum KernelOutput {
    DisplayData(DisplayContent),
    UpdateDisplayData(DisplayContent),
    Stream(StreamContent),
}

impl KernelOutput {
    /// Display identifier addressed by this output, if it is a display
    /// operation.
    pub fn display_id(&self) -> Option<&str> {
        match self {
            KernelOutput::DisplayData(content) | KernelOutput::UpdateDisplayData(content) => {
                Some(content.display_id())
            }
            KernelOutput::Stream(_) => None,
        }
    }
}
