#![allow(clippy::expect_used)]

use ai_kernel_core::AiKernel;
use ai_kernel_core::KernelConfig;
use ai_kernel_core::RecordingSink;
use ai_kernel_core::ReplayAgent;
use ai_kernel_protocol::AgentEvent;
use ai_kernel_protocol::DisplayContent;
use ai_kernel_protocol::ExecuteReply;
use ai_kernel_protocol::KernelOutput;
use ai_kernel_protocol::StreamName;
use ai_kernel_protocol::mime::TEXT_HTML;
use ai_kernel_protocol::mime::TEXT_MARKDOWN;
use ai_kernel_protocol::mime::TEXT_PLAIN;

pub fn configured_config() -> KernelConfig {
    KernelConfig {
        provider_name: Some("anthropic".to_string()),
        model: Some("test-model".to_string()),
        ..Default::default()
    }
}

pub fn replay_kernel(events: Vec<AgentEvent>) -> AiKernel<ReplayAgent> {
    AiKernel::new(ReplayAgent::new(events), configured_config())
}

/// Executes `code` once against a kernel replaying `events`.
pub async fn run_events(events: Vec<AgentEvent>) -> (ExecuteReply, Vec<KernelOutput>) {
    let mut kernel = replay_kernel(events);
    run_cell(&mut kernel, "hello").await
}

pub async fn run_cell(
    kernel: &mut AiKernel<ReplayAgent>,
    code: &str,
) -> (ExecuteReply, Vec<KernelOutput>) {
    let mut sink = RecordingSink::new();
    let reply = kernel.execute_request(code, &mut sink).await;
    (reply, sink.into_outputs())
}

/// Compact view of one output, for asserting on sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Create(String),
    Update(String),
    Stdout(String),
    Stderr(String),
}

pub fn ops(outputs: &[KernelOutput]) -> Vec<Op> {
    outputs
        .iter()
        .map(|output| match output {
            KernelOutput::DisplayData(content) => Op::Create(content.display_id().to_string()),
            KernelOutput::UpdateDisplayData(content) => {
                Op::Update(content.display_id().to_string())
            }
            KernelOutput::Stream(stream) => match stream.name {
                StreamName::Stdout => Op::Stdout(stream.text.clone()),
                StreamName::Stderr => Op::Stderr(stream.text.clone()),
            },
        })
        .collect()
}

/// Content of the last create or update addressed to `display_id`.
pub fn last_content<'a>(outputs: &'a [KernelOutput], display_id: &str) -> &'a DisplayContent {
    outputs
        .iter()
        .rev()
        .find_map(|output| match output {
            KernelOutput::DisplayData(content) | KernelOutput::UpdateDisplayData(content)
                if content.display_id() == display_id =>
            {
                Some(content)
            }
            _ => None,
        })
        .unwrap_or_else(|| panic!("no display for {display_id}"))
}

pub fn markdown(content: &DisplayContent) -> String {
    content
        .data
        .get(TEXT_MARKDOWN)
        .expect("markdown entry")
        .to_text()
}

pub fn plain_text(content: &DisplayContent) -> String {
    content.data.plain_text().expect("text/plain entry")
}

pub fn html(content: &DisplayContent) -> String {
    content.data.get(TEXT_HTML).expect("text/html entry").to_text()
}

/// Every `text/plain` entry has to be present and match the markdown for
/// response blocks.
pub fn assert_response_block(content: &DisplayContent, expected: &str) {
    assert_eq!(markdown(content), expected);
    assert_eq!(
        content.data.get(TEXT_PLAIN).map(|value| value.to_text()),
        Some(expected.to_string())
    );
    assert!(content.metadata.is_empty());
}

pub fn stderr_text(outputs: &[KernelOutput]) -> String {
    stream_text(outputs, StreamName::Stderr)
}

pub fn stdout_text(outputs: &[KernelOutput]) -> String {
    stream_text(outputs, StreamName::Stdout)
}

fn stream_text(outputs: &[KernelOutput], name: StreamName) -> String {
    outputs
        .iter()
        .filter_map(|output| match output {
            KernelOutput::Stream(stream) if stream.name == name => Some(stream.text.as_str()),
            _ => None,
        })
        .collect()
}

/// Serialized `display_data` tool result for a single payload.
pub fn single_payload(mime_type: &str, data: &str) -> String {
    serde_json::json!({"mime_type": mime_type, "data": data, "metadata": {}}).to_string()
}
