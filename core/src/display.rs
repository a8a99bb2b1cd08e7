use ai_kernel_protocol::DisplayContent;
use ai_kernel_protocol::KernelOutput;
use ai_kernel_protocol::StreamContent;
use ai_kernel_protocol::StreamName;

/// Destination of everything the kernel shows while executing.
pub trait DisplaySink: Send {
    fn emit(&mut self, output: KernelOutput);

    fn display_data(&mut self, content: DisplayContent) {
        tracing::debug!("display_data {}", content.display_id());
        self.emit(KernelOutput::DisplayData(content));
    }

    fn update_display_data(&mut self, content: DisplayContent) {
        tracing::debug!("update_display_data {}", content.display_id());
        self.emit(KernelOutput::UpdateDisplayData(content));
    }

    fn stream(&mut self, name: StreamName, text: String) {
        self.emit(KernelOutput::Stream(StreamContent { name, text }));
    }
}

/// Sink that keeps every output in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    outputs: Vec<KernelOutput>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outputs(&self) -> &[KernelOutput] {
        &self.outputs
    }

    pub fn into_outputs(self) -> Vec<KernelOutput> {
        self.outputs
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl DisplaySink for RecordingSink {
    fn emit(&mut self, output: KernelOutput) {
        self.outputs.push(output);
    }
}
