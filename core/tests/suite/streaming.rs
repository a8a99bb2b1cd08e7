#![allow(clippy::expect_used, clippy::unwrap_used)]

use ai_kernel_protocol::AgentEvent;
use core_test_support::Op;
use core_test_support::assert_response_block;
use core_test_support::last_content;
use core_test_support::ops;
use core_test_support::replay_kernel;
use core_test_support::run_cell;
use core_test_support::run_events;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn chunks_accumulate_into_a_single_display() {
    let chunks = ["# Title\n", "Some ", "text", " with `code`."];
    let events = chunks.iter().map(|c| AgentEvent::message_chunk(*c)).collect();

    let (reply, outputs) = run_events(events).await;

    assert!(reply.is_ok());
    assert_eq!(
        ops(&outputs),
        vec![
            Op::Create("response-0".into()),
            Op::Update("response-0".into()),
            Op::Update("response-0".into()),
            Op::Update("response-0".into()),
        ]
    );
    assert_response_block(
        last_content(&outputs, "response-0"),
        "# Title\nSome text with `code`.",
    );
}

#[tokio::test]
async fn every_write_carries_the_full_text_so_far() {
    let (_, outputs) = run_events(vec![
        AgentEvent::message_chunk("a"),
        AgentEvent::message_chunk("b"),
    ])
    .await;

    let texts: Vec<String> = outputs
        .iter()
        .map(|output| match output {
            ai_kernel_protocol::KernelOutput::DisplayData(content)
            | ai_kernel_protocol::KernelOutput::UpdateDisplayData(content) => {
                core_test_support::markdown(content)
            }
            other => panic!("unexpected output {other:?}"),
        })
        .collect();
    assert_eq!(texts, vec!["a".to_string(), "ab".to_string()]);
}

#[tokio::test]
async fn empty_first_chunk_still_creates_once() {
    let (_, outputs) = run_events(vec![
        AgentEvent::message_chunk(""),
        AgentEvent::message_chunk("x"),
    ])
    .await;

    assert_eq!(
        ops(&outputs),
        vec![
            Op::Create("response-0".into()),
            Op::Update("response-0".into()),
        ]
    );
}

#[tokio::test]
async fn tool_call_start_closes_the_markdown_block() {
    let (_, outputs) = run_events(vec![
        AgentEvent::message_chunk("Let me check."),
        AgentEvent::tool_call_start("call-1", "read_file", r#"{"path":"a.txt"}"#),
        AgentEvent::tool_call_complete("call-1", "read_file", "contents", false),
        AgentEvent::message_chunk("Done: "),
        AgentEvent::message_chunk("it says contents."),
    ])
    .await;

    assert_eq!(
        ops(&outputs),
        vec![
            Op::Create("response-0".into()),
            Op::Create("tool-call-1".into()),
            Op::Update("tool-call-1".into()),
            Op::Create("response-2".into()),
            Op::Update("response-2".into()),
        ]
    );
    assert_response_block(last_content(&outputs, "response-0"), "Let me check.");
    assert_response_block(
        last_content(&outputs, "response-2"),
        "Done: it says contents.",
    );
}

#[tokio::test]
async fn display_ids_stay_unique_across_executions() {
    let mut kernel = replay_kernel(vec![AgentEvent::message_chunk("hi")]);

    let (_, first) = run_cell(&mut kernel, "one").await;
    let (_, second) = run_cell(&mut kernel, "two").await;

    assert_eq!(ops(&first), vec![Op::Create("response-0".into())]);
    assert_eq!(ops(&second), vec![Op::Create("response-1".into())]);
}
