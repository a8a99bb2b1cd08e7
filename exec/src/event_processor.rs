use ai_kernel_core::DisplaySink;
use ai_kernel_core::KernelConfig;
use ai_kernel_protocol::ExecuteReply;
use ai_kernel_protocol::KernelOutput;

/// Consumes everything the kernel produces for one cell.
pub(crate) trait EventProcessor: Send {
    /// Print summary of effective configuration and user prompt.
    fn print_config_summary(&mut self, config: &KernelConfig, prompt: &str);

    /// Handle a single display or stream output from the kernel.
    fn process_output(&mut self, output: KernelOutput);

    /// Handle the reply that ends the execution.
    fn process_reply(&mut self, reply: &ExecuteReply);
}

/// Adapts an [`EventProcessor`] to the kernel's [`DisplaySink`].
pub(crate) struct ProcessorSink<'a> {
    processor: &'a mut dyn EventProcessor,
}

impl<'a> ProcessorSink<'a> {
    pub(crate) fn new(processor: &'a mut dyn EventProcessor) -> Self {
        Self { processor }
    }
}

impl DisplaySink for ProcessorSink<'_> {
    fn emit(&mut self, output: KernelOutput) {
        self.processor.process_output(output);
    }
}
