//! Rendering of an agent's event stream as notebook cell output.
//!
//! [`AiKernel::execute_request`] sends a cell to an [`Agent`] and turns the
//! events it publishes (text chunks, tool calls, approvals, errors) into
//! ordered `display_data` / `update_display_data` / `stream` outputs.

pub mod agent;
pub mod config;
pub mod dispatcher;
pub mod display;
pub mod display_data_tool;
pub mod echo_suppression;
pub mod error;
pub mod execution_state;
pub mod kernel;
pub mod mime_bundle;
pub mod replay;
pub mod tool_card;
pub mod tool_summary;

pub use agent::Agent;
pub use agent::EventBus;
pub use agent::EventSubscription;
pub use config::KernelConfig;
pub use config::KernelConfigOverrides;
pub use display::DisplaySink;
pub use display::RecordingSink;
pub use error::AgentError;
pub use error::ConfigError;
pub use error::DisplayDataParseError;
pub use kernel::AiKernel;
pub use replay::ReplayAgent;
