//! Entry-point for the `ai-kernel-exec` binary.
//!
//! Runs one cell through the AI kernel and exits with status 1 when the
//! execution reply is an error.
use ai_kernel_exec::Cli;
use ai_kernel_exec::run_main;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let reply = runtime.block_on(async {
        let cli = Cli::parse();
        run_main(cli).await
    })?;

    if !reply.is_ok() {
        std::process::exit(1);
    }
    Ok(())
}
