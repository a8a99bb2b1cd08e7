use std::collections::HashMap;

use crate::echo_suppression::EchoSuppressor;

/// Prefix of a generated display identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    /// Markdown block accumulating model text.
    Response,
    /// Tool card.
    ToolCall,
    /// `display_data` payload shown without a tool card.
    Payload,
}

impl DisplayKind {
    fn prefix(self) -> &'static str {
        match self {
            DisplayKind::Response => "response",
            DisplayKind::ToolCall => "tool-call",
            DisplayKind::Payload => "display",
        }
    }
}

/// A tool invocation whose card was created and awaits completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallContext {
    pub display_id: String,
    pub tool_name: String,
    pub input: String,
    pub summary: String,
}

/// Result of appending a chunk to the open markdown block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseWrite {
    pub display_id: String,
    /// Full accumulated text of the block.
    pub content: String,
    /// `true` when the block was just opened and must be created.
    pub is_new: bool,
}

/// Mutable context of one execution request.
///
/// [`ExecutionState::reset`] clears everything except the display id
/// counter, which keeps identifiers unique across executions of one kernel.
#[derive(Debug)]
pub struct ExecutionState {
    response_display_id: Option<String>,
    response_content: String,
    execution_error: Option<String>,
    display_id_counter: u64,
    tool_contexts: HashMap<String, ToolCallContext>,
    echo: EchoSuppressor,
}

impl ExecutionState {
    pub fn new(echo: EchoSuppressor) -> Self {
        Self {
            response_display_id: None,
            response_content: String::new(),
            execution_error: None,
            display_id_counter: 0,
            tool_contexts: HashMap::new(),
            echo,
        }
    }

    pub fn next_display_id(&mut self, kind: DisplayKind) -> String {
        let id = format!("{}-{}", kind.prefix(), self.display_id_counter);
        self.display_id_counter += 1;
        id
    }

    /// Records `message` unless an error was already recorded. Returns
    /// whether it was recorded.
    pub fn record_error(&mut self, message: &str) -> bool {
        if self.execution_error.is_some() {
            return false;
        }
        self.execution_error = Some(message.to_string());
        true
    }

    pub fn execution_error(&self) -> Option<&str> {
        self.execution_error.as_deref()
    }

    pub fn append_response(&mut self, chunk: &str) -> ResponseWrite {
        let (display_id, is_new) = match &self.response_display_id {
            Some(id) => (id.clone(), false),
            None => {
                let id = self.next_display_id(DisplayKind::Response);
                self.response_display_id = Some(id.clone());
                self.response_content.clear();
                (id, true)
            }
        };
        self.response_content.push_str(chunk);
        ResponseWrite {
            display_id,
            content: self.response_content.clone(),
            is_new,
        }
    }

    /// Closes the open markdown block so the next chunk opens a new one.
    pub fn close_response(&mut self) {
        self.response_display_id = None;
        self.response_content.clear();
    }

    pub fn response_display_id(&self) -> Option<&str> {
        self.response_display_id.as_deref()
    }

    pub fn open_tool_call(&mut self, call_id: impl Into<String>, context: ToolCallContext) {
        self.tool_contexts.insert(call_id.into(), context);
    }

    pub fn take_tool_call(&mut self, call_id: &str) -> Option<ToolCallContext> {
        self.tool_contexts.remove(call_id)
    }

    pub fn open_tool_calls(&self) -> usize {
        self.tool_contexts.len()
    }

    pub fn echo(&self) -> &EchoSuppressor {
        &self.echo
    }

    pub fn echo_mut(&mut self) -> &mut EchoSuppressor {
        &mut self.echo
    }

    pub fn reset(&mut self) {
        self.close_response();
        self.execution_error = None;
        self.tool_contexts.clear();
        self.echo.reset();
    }
}

impl Default for ExecutionState {
    fn default() -> Self {
        Self::new(EchoSuppressor::default())
    }
}
