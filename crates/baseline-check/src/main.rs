//! baseline-check: Flags CSS properties with low or no web-features baseline support.

mod cli;
mod config;
mod orchestrator;
mod output;

use clap::Parser;
use cli::Args;
use miette::{IntoDiagnostic, Result};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let summary = orchestrator::run(&args).into_diagnostic()?;
    if summary.should_fail() {
        std::process::exit(1);
    }

    Ok(())
}

/// Logs to stderr, filtered by `RUST_LOG` and silent by default.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}
