use serde::Deserialize;
use serde::Serialize;

/// Events emitted by the agent while it produces a response for one
/// execution request.
///
/// On the wire each event is `{"type": "<kind>", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum AgentEvent {
    MessageChunk(MessageChunkEvent),
    Error(AgentErrorEvent),
    ToolCallStart(ToolCallStartEvent),
    ToolCallComplete(ToolCallCompleteEvent),
    ToolApprovalRequest(ToolApprovalRequestEvent),
}

impl AgentEvent {
    /// Short kind tag, matching the `type` field on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentEvent::MessageChunk(_) => "message_chunk",
            AgentEvent::Error(_) => "error",
            AgentEvent::ToolCallStart(_) => "tool_call_start",
            AgentEvent::ToolCallComplete(_) => "tool_call_complete",
            AgentEvent::ToolApprovalRequest(_) => "tool_approval_request",
        }
    }

    pub fn message_chunk(chunk: impl Into<String>) -> Self {
        AgentEvent::MessageChunk(MessageChunkEvent {
            chunk: chunk.into(),
        })
    }

    pub fn error(message: impl Into<String>) -> Self {
        AgentEvent::Error(AgentErrorEvent {
            error: ErrorPayload {
                message: message.into(),
            },
        })
    }

    pub fn tool_call_start(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        AgentEvent::ToolCallStart(ToolCallStartEvent {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            input: input.into(),
        })
    }

    pub fn tool_call_complete(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: impl Into<String>,
        is_error: bool,
    ) -> Self {
        AgentEvent::ToolCallComplete(ToolCallCompleteEvent {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            output: output.into(),
            is_error,
        })
    }

    pub fn tool_approval_request(approval_id: impl Into<String>) -> Self {
        AgentEvent::ToolApprovalRequest(ToolApprovalRequestEvent {
            approval_id: approval_id.into(),
        })
    }
}

/// A streamed fragment of the assistant's markdown answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageChunkEvent {
    pub chunk: String,
}

/// Error reported by the agent. Does not end the stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentErrorEvent {
    pub error: ErrorPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorPayload {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallStartEvent {
    pub call_id: String,
    pub tool_name: String,
    /// Raw serialized tool arguments.
    pub input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallCompleteEvent {
    pub call_id: String,
    pub tool_name: String,
    pub output: String,
    #[serde(default)]
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolApprovalRequestEvent {
    pub approval_id: String,
}
