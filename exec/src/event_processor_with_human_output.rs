use std::collections::HashMap;

use ai_kernel_core::KernelConfig;
use ai_kernel_protocol::DisplayContent;
use ai_kernel_protocol::ExecuteReply;
use ai_kernel_protocol::KernelOutput;
use ai_kernel_protocol::StreamName;

use crate::console_writer::ConsoleWriter;
use crate::event_processor::EventProcessor;

enum Entry {
    Display(String),
    Stream(StreamName, String),
}

/// Prints the final state of every display once the cell finishes, in the
/// order displays were created, interleaved with stream writes.
pub(crate) struct EventProcessorWithHumanOutput {
    writer: Box<dyn ConsoleWriter>,
    entries: Vec<Entry>,
    displays: HashMap<String, String>,
}

impl EventProcessorWithHumanOutput {
    pub(crate) fn new(writer: Box<dyn ConsoleWriter>) -> Self {
        Self {
            writer,
            entries: Vec::new(),
            displays: HashMap::new(),
        }
    }

    fn flush(&mut self) {
        for entry in self.entries.drain(..) {
            match entry {
                Entry::Display(display_id) => {
                    let text = self.displays.remove(&display_id).unwrap_or_default();
                    self.writer.display(&display_id, &text);
                }
                Entry::Stream(StreamName::Stdout, text) => {
                    self.writer.stdout(text.trim_end_matches('\n'));
                }
                Entry::Stream(StreamName::Stderr, text) => {
                    self.writer.stderr(text.trim_end_matches('\n'));
                }
            }
        }
    }
}

/// Human readable text of a display: `text/plain`, else the first entry.
fn display_text(content: &DisplayContent) -> String {
    content
        .data
        .plain_text()
        .or_else(|| content.data.iter().next().map(|(_, value)| value.to_text()))
        .unwrap_or_default()
}

impl EventProcessor for EventProcessorWithHumanOutput {
    fn print_config_summary(&mut self, config: &KernelConfig, prompt: &str) {
        const VERSION: &str = env!("CARGO_PKG_VERSION");
        self.writer.config_entry("ai-kernel-exec", VERSION);
        let entries = [
            ("provider", config.provider_name.as_deref().unwrap_or("unset")),
            ("model", config.model.as_deref().unwrap_or("unset")),
            (
                "echo suppression",
                if config.suppress_payload_echo { "on" } else { "off" },
            ),
        ];
        for (key, value) in entries {
            self.writer.config_entry(key, value);
        }
        self.writer.config_entry("prompt", prompt.trim());
    }

    fn process_output(&mut self, output: KernelOutput) {
        match output {
            KernelOutput::DisplayData(content) => {
                let display_id = content.display_id().to_string();
                self.displays.insert(display_id.clone(), display_text(&content));
                self.entries.push(Entry::Display(display_id));
            }
            KernelOutput::UpdateDisplayData(content) => {
                let display_id = content.display_id().to_string();
                if !self.displays.contains_key(&display_id) {
                    tracing::warn!("update for unknown display {display_id}");
                    self.entries.push(Entry::Display(display_id.clone()));
                }
                self.displays.insert(display_id, display_text(&content));
            }
            KernelOutput::Stream(stream) => {
                self.entries.push(Entry::Stream(stream.name, stream.text));
            }
        }
    }

    fn process_reply(&mut self, reply: &ExecuteReply) {
        self.flush();
        match reply {
            ExecuteReply::Ok {
                execution_count, ..
            } => self.writer.reply_ok(*execution_count),
            ExecuteReply::Error {
                execution_count,
                ename,
                evalue,
                ..
            } => self
                .writer
                .reply_error(*execution_count, ename.as_str(), evalue),
        }
    }
}
