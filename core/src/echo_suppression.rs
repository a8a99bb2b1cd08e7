//! Suppression of model text that repeats a payload already shown through
//! the `display_data` tool.
//!
//! After a payload is displayed, incoming text is held back until it either
//! looks like an echo of the payload (fenced code, a bare JSON document, or
//! pretty-printed JSON) and is dropped, or the episode ends and the held
//! text is released.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Decides whether buffered text is an echo of a displayed payload.
pub type EchoPredicate = fn(&str) -> bool;

#[allow(clippy::expect_used)]
static PRETTY_JSON_OPENING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\n\s*[\[{]\s*\n\s*"[^"]+"\s*:"#).expect("valid regex"));

/// Default echo heuristic.
pub fn is_payload_echo(buffered: &str) -> bool {
    let trimmed = buffered.trim_start();
    if trimmed.is_empty() {
        return false;
    }
    if buffered.contains("```") {
        return true;
    }
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return true;
    }
    PRETTY_JSON_OPENING.is_match(buffered)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum EchoState {
    #[default]
    Idle,
    Buffering(String),
    Suppressed,
}

#[derive(Debug, Clone)]
pub struct EchoSuppressor {
    state: EchoState,
    enabled: bool,
    predicate: EchoPredicate,
}

impl Default for EchoSuppressor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EchoSuppressor {
    pub fn new(enabled: bool) -> Self {
        Self::with_predicate(enabled, is_payload_echo)
    }

    pub fn with_predicate(enabled: bool, predicate: EchoPredicate) -> Self {
        Self {
            state: EchoState::Idle,
            enabled,
            predicate,
        }
    }

    /// Starts an episode right after a payload was displayed. No-op when
    /// suppression is disabled.
    pub fn begin_episode(&mut self) {
        if self.enabled {
            self.state = EchoState::Buffering(String::new());
        }
    }

    /// Returns `true` when the chunk should be rendered now. Otherwise the
    /// chunk was either buffered or dropped as part of an echo.
    pub fn admit(&mut self, chunk: &str) -> bool {
        match &mut self.state {
            EchoState::Idle => true,
            EchoState::Suppressed => false,
            EchoState::Buffering(buffer) => {
                buffer.push_str(chunk);
                if (self.predicate)(buffer) {
                    tracing::debug!("dropping echoed display payload text");
                    self.state = EchoState::Suppressed;
                }
                false
            }
        }
    }

    /// Ends the current episode and returns text to release, if the episode
    /// never matched an echo and holds something other than whitespace.
    pub fn finish_episode(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            EchoState::Buffering(buffer) if !buffer.trim().is_empty() => Some(buffer),
            _ => None,
        }
    }

    /// Drops any episode in progress without releasing its text.
    pub fn reset(&mut self) {
        self.state = EchoState::Idle;
    }

    pub fn is_buffering(&self) -> bool {
        matches!(self.state, EchoState::Buffering(_))
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self.state, EchoState::Suppressed)
    }
}
