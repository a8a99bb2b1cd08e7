//! Wire types shared between the AI kernel, the agent that feeds it, and the
//! notebook host that renders its output.

mod agent_event;
mod display;
pub mod mime;
mod reply;

pub use agent_event::AgentErrorEvent;
pub use agent_event::AgentEvent;
pub use agent_event::ErrorPayload;
pub use agent_event::MessageChunkEvent;
pub use agent_event::ToolApprovalRequestEvent;
pub use agent_event::ToolCallCompleteEvent;
pub use agent_event::ToolCallStartEvent;
pub use display::DisplayContent;
pub use display::KernelOutput;
pub use display::StreamContent;
pub use display::StreamName;
pub use display::Transient;
pub use mime::MimeBundle;
pub use mime::MimeValue;
pub use reply::ErrorName;
pub use reply::ExecuteReply;
pub use reply::HelpLink;
pub use reply::KernelInfoReply;
pub use reply::LanguageInfo;
