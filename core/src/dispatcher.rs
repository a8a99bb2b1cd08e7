//! Routing of agent events to display operations for one execution.

use ai_kernel_protocol::AgentEvent;
use ai_kernel_protocol::DisplayContent;
use ai_kernel_protocol::MimeBundle;
use ai_kernel_protocol::StreamName;
use ai_kernel_protocol::ToolCallCompleteEvent;
use ai_kernel_protocol::ToolCallStartEvent;
use ai_kernel_protocol::mime::TEXT_MARKDOWN;
use ai_kernel_protocol::mime::TEXT_PLAIN;
use tracing::debug;
use tracing::warn;

use crate::agent::Agent;
use crate::display::DisplaySink;
use crate::display_data_tool::DISPLAY_DATA_TOOL_NAME;
use crate::execution_state::DisplayKind;
use crate::execution_state::ExecutionState;
use crate::execution_state::ToolCallContext;
use crate::mime_bundle::DisplayDataOutput;
use crate::mime_bundle::parse_display_data_output;
use crate::tool_card::ToolCard;
use crate::tool_card::ToolStatus;
use crate::tool_summary::extract_tool_summary;

/// Applies agent events, one at a time and in arrival order, to the
/// execution state and the display sink.
pub struct EventDispatcher<'a> {
    agent: &'a dyn Agent,
    state: &'a mut ExecutionState,
    sink: &'a mut dyn DisplaySink,
    approval_reason: &'a str,
}

impl<'a> EventDispatcher<'a> {
    pub fn new(
        agent: &'a dyn Agent,
        state: &'a mut ExecutionState,
        sink: &'a mut dyn DisplaySink,
        approval_reason: &'a str,
    ) -> Self {
        Self {
            agent,
            state,
            sink,
            approval_reason,
        }
    }

    pub fn dispatch(&mut self, event: AgentEvent) {
        debug!("dispatching {} event", event.kind());
        match event {
            AgentEvent::MessageChunk(event) => self.on_message_chunk(&event.chunk),
            AgentEvent::Error(event) => self.on_error(&event.error.message),
            AgentEvent::ToolCallStart(event) => self.on_tool_call_start(event),
            AgentEvent::ToolCallComplete(event) => self.on_tool_call_complete(event),
            AgentEvent::ToolApprovalRequest(event) => {
                debug!("auto-approving {}", event.approval_id);
                self.agent
                    .approve_tool_call(&event.approval_id, self.approval_reason);
            }
        }
    }

    /// Ends the current echo episode, rendering any text it held back.
    pub fn flush_echo(&mut self) {
        if let Some(text) = self.state.echo_mut().finish_episode() {
            debug!("releasing {} buffered bytes", text.len());
            self.render_chunk(&text);
        }
    }

    /// Writes `Error: {message}` to stderr without recording it.
    pub fn write_error(&mut self, message: &str) {
        self.sink
            .stream(StreamName::Stderr, format!("Error: {message}\n"));
    }

    fn on_message_chunk(&mut self, chunk: &str) {
        if self.state.echo_mut().admit(chunk) {
            self.render_chunk(chunk);
        }
    }

    fn render_chunk(&mut self, chunk: &str) {
        let write = self.state.append_response(chunk);
        let bundle = MimeBundle::new()
            .with(TEXT_MARKDOWN, write.content.clone())
            .with(TEXT_PLAIN, write.content);
        let content = DisplayContent::new(write.display_id, bundle);
        if write.is_new {
            self.sink.display_data(content);
        } else {
            self.sink.update_display_data(content);
        }
    }

    fn on_error(&mut self, message: &str) {
        if !self.state.record_error(message) {
            debug!("keeping first execution error, ignoring: {message}");
        }
        self.write_error(message);
    }

    fn on_tool_call_start(&mut self, event: ToolCallStartEvent) {
        let ToolCallStartEvent {
            call_id,
            tool_name,
            input,
        } = event;

        self.flush_echo();
        self.state.close_response();

        let display_id = self.state.next_display_id(DisplayKind::ToolCall);
        let summary = extract_tool_summary(&tool_name, &input);
        let card = ToolCard {
            tool_name: &tool_name,
            input: &input,
            status: ToolStatus::Pending,
            summary: &summary,
            output: None,
        }
        .render();
        self.sink.display_data(DisplayContent::new(
            display_id.clone(),
            card.into_bundle(),
        ));

        self.state.open_tool_call(
            call_id,
            ToolCallContext {
                display_id,
                tool_name,
                input,
                summary,
            },
        );
    }

    fn on_tool_call_complete(&mut self, event: ToolCallCompleteEvent) {
        let ToolCallCompleteEvent {
            call_id,
            tool_name,
            output,
            is_error,
        } = event;

        if tool_name == DISPLAY_DATA_TOOL_NAME && !is_error {
            self.on_display_payload(&call_id, &output);
            return;
        }

        match self.state.take_tool_call(&call_id) {
            Some(context) => {
                let status = ToolStatus::from_outcome(is_error);
                self.update_card(&context, status, &output);
            }
            None => {
                warn!("tool call {call_id} ({tool_name}) completed without a matching start");
                if is_error {
                    self.sink.stream(
                        StreamName::Stderr,
                        format!("[Tool {tool_name} failed: {output}]\n"),
                    );
                } else {
                    self.sink
                        .stream(StreamName::Stdout, format!("[Tool {tool_name} completed]\n"));
                }
            }
        }
    }

    fn on_display_payload(&mut self, call_id: &str, output: &str) {
        let context = self.state.take_tool_call(call_id);

        let DisplayDataOutput { bundle, metadata } = match parse_display_data_output(output) {
            Ok(parsed) => parsed,
            Err(err) => {
                let message = format!("Failed to parse display_data output ({err})");
                warn!("{message}");
                if let Some(context) = &context {
                    self.update_card(context, ToolStatus::Error, &message);
                }
                self.write_error(&message);
                return;
            }
        };

        match context {
            Some(context) => {
                let content =
                    DisplayContent::new(context.display_id, bundle).with_metadata(metadata);
                self.sink.update_display_data(content);
            }
            None => {
                let display_id = self.state.next_display_id(DisplayKind::Payload);
                let content = DisplayContent::new(display_id, bundle).with_metadata(metadata);
                self.sink.display_data(content);
            }
        }

        self.state.echo_mut().begin_episode();
    }

    fn update_card(&mut self, context: &ToolCallContext, status: ToolStatus, output: &str) {
        let card = ToolCard {
            tool_name: &context.tool_name,
            input: &context.input,
            status,
            summary: &context.summary,
            output: Some(output),
        }
        .render();
        self.sink.update_display_data(DisplayContent::new(
            context.display_id.clone(),
            card.into_bundle(),
        ));
    }
}
