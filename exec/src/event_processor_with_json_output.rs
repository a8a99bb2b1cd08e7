use std::io::Write;

use ai_kernel_core::KernelConfig;
use ai_kernel_protocol::ExecuteReply;
use ai_kernel_protocol::KernelOutput;
use serde::Serialize;

use crate::event_processor::EventProcessor;

/// Prints each kernel output, then the reply, as one JSON object per line.
pub(crate) struct EventProcessorWithJsonOutput<W: Write> {
    out: W,
}

impl<W: Write> EventProcessorWithJsonOutput<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: Serialize>(&mut self, value: &T) {
        match serde_json::to_string(value) {
            Ok(line) => {
                let _ = writeln!(self.out, "{line}");
            }
            Err(err) => tracing::error!("failed to serialize output: {err}"),
        }
    }
}

impl<W: Write + Send> EventProcessor for EventProcessorWithJsonOutput<W> {
    fn print_config_summary(&mut self, _config: &KernelConfig, _prompt: &str) {
        // The JSON stream carries outputs and the reply only.
    }

    fn process_output(&mut self, output: KernelOutput) {
        self.write_line(&output);
    }

    fn process_reply(&mut self, reply: &ExecuteReply) {
        self.write_line(reply);
        let _ = self.out.flush();
    }
}
