#![allow(clippy::expect_used, clippy::unwrap_used)]

use ai_kernel_core::AiKernel;
use ai_kernel_core::KernelConfig;
use ai_kernel_core::ReplayAgent;
use ai_kernel_core::display_data_tool::DISPLAY_DATA_TOOL_NAME;
use ai_kernel_protocol::AgentEvent;
use ai_kernel_protocol::MimeBundle;
use ai_kernel_protocol::MimeValue;
use core_test_support::Op;
use core_test_support::assert_response_block;
use core_test_support::configured_config;
use core_test_support::last_content;
use core_test_support::ops;
use core_test_support::plain_text;
use core_test_support::run_cell;
use core_test_support::run_events;
use core_test_support::single_payload;
use core_test_support::stderr_text;
use pretty_assertions::assert_eq;
use serde_json::json;

const HTML_INPUT: &str = r#"{"mime_type":"text/html","data":"<b>x</b>"}"#;

fn display_call(output: &str) -> Vec<AgentEvent> {
    vec![
        AgentEvent::tool_call_start("call-1", DISPLAY_DATA_TOOL_NAME, HTML_INPUT),
        AgentEvent::tool_call_complete("call-1", DISPLAY_DATA_TOOL_NAME, output, false),
    ]
}

#[tokio::test]
async fn payload_replaces_the_pending_card() {
    let output = json!({
        "displayed": true,
        "mime_type": "text/html",
        "data": "<b>x</b>",
        "metadata": {"isolated": true}
    })
    .to_string();

    let (reply, outputs) = run_events(display_call(&output)).await;

    assert!(reply.is_ok());
    assert_eq!(
        ops(&outputs),
        vec![
            Op::Create("tool-call-0".into()),
            Op::Update("tool-call-0".into()),
        ]
    );
    let shown = last_content(&outputs, "tool-call-0");
    assert_eq!(
        shown.data,
        MimeBundle::new()
            .with("text/html", "<b>x</b>")
            .with("text/plain", "<b>x</b>")
    );
    assert_eq!(shown.metadata.get("isolated"), Some(&json!(true)));
}

#[tokio::test]
async fn payload_without_card_gets_its_own_display() {
    let output = json!({"data": {"text/latex": "\\boxed{5}"}}).to_string();

    let (_, outputs) = run_events(vec![AgentEvent::tool_call_complete(
        "call-9",
        DISPLAY_DATA_TOOL_NAME,
        output,
        false,
    )])
    .await;

    assert_eq!(ops(&outputs), vec![Op::Create("display-0".into())]);
    let shown = last_content(&outputs, "display-0");
    assert_eq!(
        shown.data.get("text/latex"),
        Some(&MimeValue::Text("\\boxed{5}".into()))
    );
    assert_eq!(plain_text(shown), "\\boxed{5}");
    assert!(shown.metadata.is_empty());
}

#[tokio::test]
async fn malformed_payload_becomes_an_error_card() {
    let (reply, outputs) =
        run_events(display_call(r#"{"mime_type":"text/html"}"#)).await;

    assert!(reply.is_ok(), "parse failures stay local to the card");
    let message = "Failed to parse display_data output (Missing \"data\" for single MIME payload)";
    assert_eq!(
        ops(&outputs),
        vec![
            Op::Create("tool-call-0".into()),
            Op::Update("tool-call-0".into()),
            Op::Stderr(format!("Error: {message}\n")),
        ]
    );
    let card = last_content(&outputs, "tool-call-0");
    assert_eq!(
        plain_text(card),
        format!("[Tool: display_data] (Error)\nInput: {HTML_INPUT}\nError: {message}")
    );
}

#[tokio::test]
async fn malformed_payload_without_card_only_writes_stderr() {
    let (reply, outputs) = run_events(vec![AgentEvent::tool_call_complete(
        "call-1",
        DISPLAY_DATA_TOOL_NAME,
        r#"{"data": {}}"#,
        false,
    )])
    .await;

    assert!(reply.is_ok());
    assert_eq!(
        stderr_text(&outputs),
        "Error: Failed to parse display_data output (MIME bundle is empty)\n"
    );
    assert_eq!(outputs.len(), 1);
}

#[tokio::test]
async fn failed_display_tool_uses_the_generic_card() {
    let (_, outputs) = run_events(vec![
        AgentEvent::tool_call_start("call-1", DISPLAY_DATA_TOOL_NAME, HTML_INPUT),
        AgentEvent::tool_call_complete("call-1", DISPLAY_DATA_TOOL_NAME, "renderer missing", true),
    ])
    .await;

    let card = last_content(&outputs, "tool-call-0");
    assert!(plain_text(card).ends_with("\nError: renderer missing"));
}

#[tokio::test]
async fn echoed_payload_text_is_suppressed() {
    let mut events = display_call(&single_payload("application/json", r#"{"a": 1}"#));
    events.extend([
        AgentEvent::message_chunk("```json\n"),
        AgentEvent::message_chunk("{\"a\": 1}\n```"),
        AgentEvent::message_chunk("Here is a summary: one key."),
    ]);

    let (reply, outputs) = run_events(events).await;

    assert!(reply.is_ok());
    assert_eq!(
        ops(&outputs),
        vec![
            Op::Create("tool-call-0".into()),
            Op::Update("tool-call-0".into()),
        ]
    );
}

#[tokio::test]
async fn pretty_printed_json_echo_is_suppressed() {
    let mut events = display_call(&single_payload("text/plain", "a"));
    events.extend([
        AgentEvent::message_chunk("The data:\n"),
        AgentEvent::message_chunk("{\n  \"rows\": 2\n}"),
    ]);

    let (_, outputs) = run_events(events).await;

    assert_eq!(outputs.len(), 2);
}

#[tokio::test]
async fn held_prose_is_released_when_the_execution_ends() {
    let mut events = display_call(&single_payload("text/html", "<i>chart</i>"));
    events.extend([
        AgentEvent::message_chunk("Here is a summary: "),
        AgentEvent::message_chunk("growth is steady."),
    ]);

    let (_, outputs) = run_events(events).await;

    assert_eq!(
        ops(&outputs),
        vec![
            Op::Create("tool-call-0".into()),
            Op::Update("tool-call-0".into()),
            Op::Create("response-1".into()),
        ]
    );
    assert_response_block(
        last_content(&outputs, "response-1"),
        "Here is a summary: growth is steady.",
    );
}

#[tokio::test]
async fn held_prose_is_released_before_the_next_tool_card() {
    let mut events = display_call(&single_payload("text/html", "<i>chart</i>"));
    events.extend([
        AgentEvent::message_chunk("Next I will save."),
        AgentEvent::tool_call_start("call-2", "execute_command", r#"{"commandId":"docmanager:save"}"#),
    ]);

    let (_, outputs) = run_events(events).await;

    assert_eq!(
        ops(&outputs),
        vec![
            Op::Create("tool-call-0".into()),
            Op::Update("tool-call-0".into()),
            Op::Create("response-1".into()),
            Op::Create("tool-call-2".into()),
        ]
    );
}

#[tokio::test]
async fn suppression_can_be_disabled() {
    let config = KernelConfig {
        suppress_payload_echo: false,
        ..configured_config()
    };
    let mut events = display_call(&single_payload("text/html", "<i>chart</i>"));
    events.push(AgentEvent::message_chunk("```json\n{}\n```"));
    let mut kernel = AiKernel::new(ReplayAgent::new(events), config);

    let (_, outputs) = run_cell(&mut kernel, "chart").await;

    assert_eq!(
        ops(&outputs),
        vec![
            Op::Create("tool-call-0".into()),
            Op::Update("tool-call-0".into()),
            Op::Create("response-1".into()),
        ]
    );
}
