//! The agent seam: what the kernel needs from the client that talks to the
//! model, and the event bus agents publish into.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::Weak;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use ai_kernel_protocol::AgentEvent;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AgentError;

#[async_trait]
pub trait Agent: Send + Sync {
    /// Whether a provider is configured well enough to send a prompt.
    fn has_valid_config(&self) -> bool;

    /// Attaches a new listener to the agent's event stream.
    fn subscribe(&self) -> EventSubscription;

    /// Sends `prompt` and resolves once the agent has finished responding.
    /// Events produced meanwhile are delivered through subscriptions.
    async fn generate_response(&self, prompt: &str) -> Result<(), AgentError>;

    fn approve_tool_call(&self, approval_id: &str, reason: &str);
}

type SubscriberMap = HashMap<u64, mpsc::UnboundedSender<AgentEvent>>;

#[derive(Debug, Default)]
struct BusInner {
    next_id: AtomicU64,
    subscribers: Mutex<SubscriberMap>,
}

impl BusInner {
    fn subscribers(&self) -> std::sync::MutexGuard<'_, SubscriberMap> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fan-out of agent events to every live [`EventSubscription`].
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> EventSubscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.subscribers().insert(id, tx);
        EventSubscription {
            id,
            receiver: rx,
            bus: Arc::downgrade(&self.inner),
        }
    }

    pub fn publish(&self, event: AgentEvent) {
        let mut subscribers = self.inner.subscribers();
        if subscribers.is_empty() {
            tracing::debug!("no subscribers for {} event", event.kind());
            return;
        }
        subscribers.retain(|_, tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers().len()
    }
}

/// Receiving end of an [`EventBus`] subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct EventSubscription {
    id: u64,
    receiver: mpsc::UnboundedReceiver<AgentEvent>,
    bus: Weak<BusInner>,
}

impl EventSubscription {
    /// Waits for the next event. Returns `None` once the bus is gone and
    /// every queued event was received.
    pub async fn recv(&mut self) -> Option<AgentEvent> {
        self.receiver.recv().await
    }

    /// Returns an already queued event without waiting.
    pub fn try_recv(&mut self) -> Option<AgentEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.subscribers().remove(&self.id);
        }
    }
}
