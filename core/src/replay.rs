use std::sync::Mutex;
use std::sync::PoisonError;

use ai_kernel_protocol::AgentEvent;
use async_trait::async_trait;

use crate::agent::Agent;
use crate::agent::EventBus;
use crate::agent::EventSubscription;
use crate::error::AgentError;

/// An approval granted through [`Agent::approve_tool_call`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    pub approval_id: String,
    pub reason: String,
}

/// Agent that replays a recorded event log for every prompt.
///
/// Events are published one at a time with a yield in between so that the
/// kernel observes them while the call is still in flight.
#[derive(Debug)]
pub struct ReplayAgent {
    bus: EventBus,
    events: Vec<AgentEvent>,
    failure: Option<String>,
    configured: bool,
    prompts: Mutex<Vec<String>>,
    approvals: Mutex<Vec<Approval>>,
}

impl ReplayAgent {
    pub fn new(events: Vec<AgentEvent>) -> Self {
        Self {
            bus: EventBus::new(),
            events,
            failure: None,
            configured: true,
            prompts: Mutex::new(Vec::new()),
            approvals: Mutex::new(Vec::new()),
        }
    }

    /// Makes `generate_response` fail with `message` after replaying.
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn configured(mut self, configured: bool) -> Self {
        self.configured = configured;
        self
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn approvals(&self) -> Vec<Approval> {
        self.approvals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Agent for ReplayAgent {
    fn has_valid_config(&self) -> bool {
        self.configured
    }

    fn subscribe(&self) -> EventSubscription {
        self.bus.subscribe()
    }

    async fn generate_response(&self, prompt: &str) -> Result<(), AgentError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        for event in &self.events {
            self.bus.publish(event.clone());
            tokio::task::yield_now().await;
        }

        match &self.failure {
            Some(message) => Err(AgentError::Failed(message.clone())),
            None => Ok(()),
        }
    }

    fn approve_tool_call(&self, approval_id: &str, reason: &str) {
        self.approvals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Approval {
                approval_id: approval_id.to_string(),
                reason: reason.to_string(),
            });
    }
}
