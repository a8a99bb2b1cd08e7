use ai_kernel_protocol::ErrorName;
use ai_kernel_protocol::ExecuteReply;
use ai_kernel_protocol::HelpLink;
use ai_kernel_protocol::KernelInfoReply;
use ai_kernel_protocol::LanguageInfo;
use ai_kernel_protocol::StreamName;
use tracing::info;

use crate::agent::Agent;
use crate::agent::EventSubscription;
use crate::config::KernelConfig;
use crate::dispatcher::EventDispatcher;
use crate::display::DisplaySink;
use crate::echo_suppression::EchoSuppressor;
use crate::error::AgentError;
use crate::execution_state::ExecutionState;

/// Context appended to every prompt so the model knows where its answer is
/// shown.
pub const AI_KERNEL_PROMPT_SUFFIX: &str = "---
AI kernel context:
- You are responding in a notebook AI kernel cell output.
- Output appears as cell output; respond in Markdown.
- Use the display_data tool to emit rich MIME outputs when helpful.
- If you use display_data, do not repeat the same payload in Markdown.
- Avoid chat or sidebar UI references.";

pub const CONFIGURATION_ERROR_MESSAGE: &str = "AI provider not configured";
const CONFIGURATION_ERROR_STREAM: &str =
    "Error: AI provider not configured. Check your API key in the AI kernel settings.\n";

const IMPLEMENTATION: &str = "AI";
const IMPLEMENTATION_VERSION: &str = "0.1.0";
const PROTOCOL_VERSION: &str = "5.3";

/// A notebook kernel whose cells are prompts answered by an [`Agent`].
pub struct AiKernel<A: Agent> {
    agent: A,
    config: KernelConfig,
    state: ExecutionState,
    execution_count: u64,
}

impl<A: Agent> AiKernel<A> {
    pub fn new(agent: A, config: KernelConfig) -> Self {
        let state = ExecutionState::new(EchoSuppressor::new(config.suppress_payload_echo));
        Self {
            agent,
            config,
            state,
            execution_count: 0,
        }
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn kernel_info(&self) -> KernelInfoReply {
        let provider = self.config.provider_name.as_deref().unwrap_or("unknown");
        let model = self.config.model.as_deref().unwrap_or("unknown");
        KernelInfoReply {
            implementation: IMPLEMENTATION.to_string(),
            implementation_version: IMPLEMENTATION_VERSION.to_string(),
            language_info: LanguageInfo {
                name: "markdown".to_string(),
                version: "1.0".to_string(),
                mimetype: "text/markdown".to_string(),
                file_extension: ".md".to_string(),
                pygments_lexer: "markdown".to_string(),
                nbconvert_exporter: "markdown".to_string(),
            },
            protocol_version: PROTOCOL_VERSION.to_string(),
            banner: format!("AI Kernel - {provider} ({model})"),
            help_links: vec![HelpLink {
                text: "JupyterLite AI".to_string(),
                url: "https://github.com/jupyterlite/jupyterlite-ai".to_string(),
            }],
        }
    }

    fn prompt_for(&self, code: &str) -> String {
        if self.config.append_prompt_suffix {
            format!("{code}\n\n{AI_KERNEL_PROMPT_SUFFIX}")
        } else {
            code.to_string()
        }
    }

    /// Runs one cell: sends `code` to the agent and renders every event it
    /// produces into `sink` until the agent call returns.
    pub async fn execute_request(
        &mut self,
        code: &str,
        sink: &mut dyn DisplaySink,
    ) -> ExecuteReply {
        self.execution_count += 1;
        let execution_count = self.execution_count;
        self.state.reset();

        if code.trim().is_empty() {
            return ExecuteReply::ok(execution_count);
        }

        if !self.agent.has_valid_config() {
            sink.stream(StreamName::Stderr, CONFIGURATION_ERROR_STREAM.to_string());
            return ExecuteReply::error(
                execution_count,
                ErrorName::ConfigurationError,
                CONFIGURATION_ERROR_MESSAGE,
            );
        }

        info!("execution {execution_count} started");
        let prompt = self.prompt_for(code);
        let subscription = self.agent.subscribe();
        let mut dispatcher = EventDispatcher::new(
            &self.agent,
            &mut self.state,
            sink,
            &self.config.approval_reason,
        );

        let result = drive(&self.agent, &mut dispatcher, subscription, &prompt).await;
        if let Err(err) = &result {
            dispatcher.write_error(&err.to_string());
        }
        dispatcher.flush_echo();
        drop(dispatcher);

        let reply = match (result, self.state.execution_error()) {
            (Ok(()), None) => ExecuteReply::ok(execution_count),
            (_, Some(message)) => {
                ExecuteReply::error(execution_count, ErrorName::AiError, message)
            }
            (Err(err), None) => {
                ExecuteReply::error(execution_count, ErrorName::AiError, err.to_string())
            }
        };
        self.state.reset();
        info!(
            "execution {execution_count} finished: {}",
            if reply.is_ok() { "ok" } else { "error" }
        );
        reply
    }
}

/// Polls the agent call and the event subscription together, preferring
/// events, then applies the events queued when the call returned. The
/// subscription is dropped before returning.
async fn drive(
    agent: &dyn Agent,
    dispatcher: &mut EventDispatcher<'_>,
    mut subscription: EventSubscription,
    prompt: &str,
) -> Result<(), AgentError> {
    let mut response = agent.generate_response(prompt);
    let result = loop {
        tokio::select! {
            biased;
            Some(event) = subscription.recv() => dispatcher.dispatch(event),
            result = &mut response => break result,
        }
    };
    drain(dispatcher, &mut subscription);
    result
}

fn drain(dispatcher: &mut EventDispatcher<'_>, subscription: &mut EventSubscription) {
    while let Some(event) = subscription.try_recv() {
        dispatcher.dispatch(event);
    }
}
