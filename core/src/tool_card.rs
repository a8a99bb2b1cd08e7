//! Rich and plain-text rendering of a tool call's lifecycle.

use ai_kernel_protocol::MimeBundle;
use ai_kernel_protocol::mime::TEXT_HTML;
use ai_kernel_protocol::mime::TEXT_PLAIN;
use askama::Template;
use askama::filters::Html;
use askama::filters::escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    Pending,
    Completed,
    Error,
}

impl ToolStatus {
    pub fn from_outcome(is_error: bool) -> Self {
        if is_error {
            ToolStatus::Error
        } else {
            ToolStatus::Completed
        }
    }

    fn card_class(self) -> &'static str {
        match self {
            ToolStatus::Pending => "jp-ai-tool-pending",
            ToolStatus::Completed => "jp-ai-tool-completed",
            ToolStatus::Error => "jp-ai-tool-error",
        }
    }

    fn status_class(self) -> &'static str {
        match self {
            ToolStatus::Pending => "jp-ai-tool-status-pending",
            ToolStatus::Completed => "jp-ai-tool-status-completed",
            ToolStatus::Error => "jp-ai-tool-status-error",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolStatus::Pending => "Running...",
            ToolStatus::Completed => "Completed",
            ToolStatus::Error => "Error",
        }
    }

    fn output_label(self) -> &'static str {
        match self {
            ToolStatus::Error => "Error",
            ToolStatus::Pending | ToolStatus::Completed => "Result",
        }
    }
}

/// Everything shown on a tool card.
#[derive(Debug, Clone, Copy)]
pub struct ToolCard<'a> {
    pub tool_name: &'a str,
    pub input: &'a str,
    pub status: ToolStatus,
    pub summary: &'a str,
    pub output: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedToolCard {
    pub html: String,
    pub text: String,
}

impl RenderedToolCard {
    pub fn into_bundle(self) -> MimeBundle {
        MimeBundle::new()
            .with(TEXT_HTML, self.html)
            .with(TEXT_PLAIN, self.text)
    }
}

#[derive(Template)]
#[template(path = "tool_card/card.html")]
struct ToolCardTemplate<'a> {
    tool_name: &'a str,
    summary: &'a str,
    input: &'a str,
    output: Option<&'a str>,
    card_class: &'static str,
    status_class: &'static str,
    status_label: &'static str,
    output_label: &'static str,
}

impl ToolCard<'_> {
    pub fn render(&self) -> RenderedToolCard {
        let text = self.render_text();
        let html = match self.render_html() {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!("failed to render tool card for {}: {err}", self.tool_name);
                let Ok(escaped) = escape(&text, Html);
                format!("<pre>{escaped}</pre>")
            }
        };
        RenderedToolCard { html, text }
    }

    fn render_html(&self) -> askama::Result<String> {
        ToolCardTemplate {
            tool_name: self.tool_name,
            summary: self.summary,
            input: self.input,
            output: self.output,
            card_class: self.status.card_class(),
            status_class: self.status.status_class(),
            status_label: self.status.label(),
            output_label: self.status.output_label(),
        }
        .render()
    }

    fn render_text(&self) -> String {
        let summary = if self.summary.is_empty() {
            String::new()
        } else {
            format!(" {}", self.summary)
        };
        let mut text = format!(
            "[Tool: {}{summary}] ({})\nInput: {}",
            self.tool_name,
            self.status.label(),
            self.input
        );
        if let Some(output) = self.output {
            text.push_str(&format!("\n{}: {output}", self.status.output_label()));
        }
        text
    }
}
