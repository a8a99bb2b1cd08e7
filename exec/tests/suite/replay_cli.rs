#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const EVENTS: &str = r#"{"type":"message_chunk","data":{"chunk":"Plotting "}}
{"type":"message_chunk","data":{"chunk":"now."}}
{"type":"tool_call_start","data":{"callId":"c1","toolName":"display_data","input":"{}"}}
{"type":"tool_call_complete","data":{"callId":"c1","toolName":"display_data","output":"{\"mime_type\":\"text/html\",\"data\":\"<b>5</b>\"}","isError":false}}
{"type":"message_chunk","data":{"chunk":"```html\n<b>5</b>\n```"}}
"#;

fn exec_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ai-kernel-exec").expect("binary is built");
    cmd.env("AI_KERNEL_HOME", home).env_remove("RUST_LOG");
    cmd
}

fn write_events(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("events.jsonl");
    std::fs::write(&path, EVENTS).expect("write events");
    path
}

#[test]
fn json_mode_prints_display_operations_and_reply() {
    let home = TempDir::new().unwrap();
    let events = write_events(&home);

    let output = exec_cmd(home.path())
        .args(["--json", "--provider-name", "anthropic", "--model", "small"])
        .arg("--events")
        .arg(&events)
        .arg("plot 5")
        .output()
        .expect("run binary");

    assert!(output.status.success());
    let lines: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();

    let kinds: Vec<&str> = lines
        .iter()
        .map(|line| {
            line.get("msg_type")
                .or_else(|| line.get("status"))
                .and_then(Value::as_str)
                .unwrap()
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "display_data",
            "update_display_data",
            "display_data",
            "update_display_data",
            "ok",
        ]
    );
    assert_eq!(
        lines[3]["content"]["data"],
        serde_json::json!({"text/html": "<b>5</b>", "text/plain": "<b>5</b>"})
    );
}

#[test]
fn config_file_supplies_the_provider() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        "provider_name = \"anthropic\"\nmodel = \"small\"\n",
    )
    .unwrap();
    let events = write_events(&home);

    exec_cmd(home.path())
        .args(["--color", "never", "--events"])
        .arg(&events)
        .arg("plot 5")
        .assert()
        .success()
        .stdout(contains("[response-0]\nPlotting now.\n"))
        .stdout(contains("[1] ok"));
}

#[test]
fn missing_provider_exits_with_error() {
    let home = TempDir::new().unwrap();

    exec_cmd(home.path())
        .args(["--json", "hello"])
        .assert()
        .code(1)
        .stdout(contains("AI provider not configured"))
        .stdout(contains("\"ename\":\"ConfigurationError\""));
}

#[test]
fn agent_failure_exits_with_error() {
    let home = TempDir::new().unwrap();

    exec_cmd(home.path())
        .args(["--color", "never", "-c", "provider_name=anthropic", "-c", "model=small"])
        .args(["--fail-with", "connection reset", "hello"])
        .assert()
        .code(1)
        .stdout(contains("Error: connection reset\n"))
        .stdout(contains("[1] AIError: connection reset"));
}
