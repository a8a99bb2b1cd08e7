mod cli;
mod config_override;
mod console_writer;
mod event_processor;
mod event_processor_with_human_output;
mod event_processor_with_json_output;

use std::io::IsTerminal;
use std::io::Read;
use std::path::Path;

use ai_kernel_core::AiKernel;
use ai_kernel_core::KernelConfig;
use ai_kernel_core::KernelConfigOverrides;
use ai_kernel_core::ReplayAgent;
use ai_kernel_core::config::find_ai_kernel_home;
use ai_kernel_core::config::load_config_as_value;
use ai_kernel_protocol::AgentEvent;
use ai_kernel_protocol::ExecuteReply;
use anyhow::Context;
pub use cli::Cli;
pub use cli::Color;
pub use config_override::CliConfigOverrides;
use console_writer::AnsiConsoleWriter;
use console_writer::PlainConsoleWriter;
use event_processor::EventProcessor;
use event_processor::ProcessorSink;
use event_processor_with_human_output::EventProcessorWithHumanOutput;
use event_processor_with_json_output::EventProcessorWithJsonOutput;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub async fn run_main(cli: Cli) -> anyhow::Result<ExecuteReply> {
    let Cli {
        events,
        fail_with,
        json: json_mode,
        color,
        provider_name,
        model,
        config_overrides,
        prompt,
    } = cli;

    // Determine the prompt based on CLI arg and/or stdin.
    let prompt = match prompt {
        Some(p) if p != "-" => p,
        // Either `-` was passed or no positional arg.
        maybe_dash => {
            let force_stdin = matches!(maybe_dash.as_deref(), Some("-"));

            if std::io::stdin().is_terminal() && !force_stdin {
                eprintln!(
                    "No prompt provided. Either specify one as an argument or pipe the prompt into stdin."
                );
                std::process::exit(1);
            }

            if !force_stdin {
                eprintln!("Reading prompt from stdin...");
            }
            let mut buffer = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
                eprintln!("Failed to read prompt from stdin: {e}");
                std::process::exit(1);
            }
            buffer
        }
    };

    let (stdout_with_ansi, stderr_with_ansi) = match color {
        Color::Always => (true, true),
        Color::Never => (false, false),
        Color::Auto => (
            std::io::stdout().is_terminal(),
            std::io::stderr().is_terminal(),
        ),
    };

    let default_level = "error";
    let _ = tracing_subscriber::fmt()
        // Fallback to the `default_level` log filter if the environment
        // variable is not set _or_ contains an invalid value
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_ansi(stderr_with_ansi)
        .with_writer(std::io::stderr)
        .try_init();

    let ai_kernel_home = find_ai_kernel_home().context("locating the AI kernel home")?;
    let mut config_value = load_config_as_value(&ai_kernel_home)?;
    config_overrides
        .apply_on_value(&mut config_value)
        .map_err(anyhow::Error::msg)?;
    let config = KernelConfig::from_value(
        config_value,
        KernelConfigOverrides {
            provider_name,
            model,
            ..Default::default()
        },
    )?;

    let events = match events {
        Some(path) => read_event_log(&path)?,
        None => Vec::new(),
    };
    debug!("replaying {} agent events", events.len());

    let mut agent = ReplayAgent::new(events).configured(config.has_provider());
    if let Some(message) = fail_with {
        agent = agent.failing_with(message);
    }

    let mut event_processor: Box<dyn EventProcessor> = if json_mode {
        Box::new(EventProcessorWithJsonOutput::new(std::io::stdout()))
    } else if stdout_with_ansi {
        Box::new(EventProcessorWithHumanOutput::new(Box::new(
            AnsiConsoleWriter::new(std::io::stdout()),
        )))
    } else {
        Box::new(EventProcessorWithHumanOutput::new(Box::new(
            PlainConsoleWriter::new(std::io::stdout()),
        )))
    };

    // Print the effective configuration and prompt so users can see what the
    // kernel is about to run.
    event_processor.print_config_summary(&config, &prompt);

    let mut kernel = AiKernel::new(agent, config);
    let reply = {
        let mut sink = ProcessorSink::new(event_processor.as_mut());
        kernel.execute_request(&prompt, &mut sink).await
    };
    event_processor.process_reply(&reply);

    Ok(reply)
}

fn read_event_log(path: &Path) -> anyhow::Result<Vec<AgentEvent>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read events from {}", path.display()))?;
    parse_event_log(&contents)
}

/// Parses a JSON lines agent event log. Blank lines are skipped.
pub fn parse_event_log(contents: &str) -> anyhow::Result<Vec<AgentEvent>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<AgentEvent>(line)
                .with_context(|| format!("invalid agent event on line {}", index + 1))
        })
        .collect()
}
