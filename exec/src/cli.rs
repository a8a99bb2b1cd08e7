use clap::Parser;
use clap::ValueEnum;
use std::path::PathBuf;

use crate::config_override::CliConfigOverrides;

/// Command-line interface for `ai-kernel-exec`: runs one cell through the AI
/// kernel against a recorded agent event log.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// JSON lines file with one agent event per line, replayed while the
    /// cell executes.
    #[arg(long = "events", value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Make the agent call fail with this message after the events are
    /// replayed.
    #[arg(long = "fail-with", value_name = "MSG")]
    pub fail_with: Option<String>,

    /// Print every display operation and the reply as JSON lines.
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,

    /// Specifies color settings for use in the output.
    #[arg(long = "color", value_enum, default_value_t = Color::Auto)]
    pub color: Color,

    /// Provider name shown in the kernel banner.
    #[arg(long = "provider-name", value_name = "NAME")]
    pub provider_name: Option<String>,

    /// Model the agent should use.
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    #[clap(flatten)]
    pub config_overrides: CliConfigOverrides,

    /// Cell source sent to the agent. If not provided as an argument (or if
    /// `-` is used), it is read from stdin.
    #[arg(value_name = "PROMPT")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Color {
    Always,
    Never,
    #[default]
    Auto,
}
