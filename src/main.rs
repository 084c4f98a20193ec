//! flawfinder-review - Diff-scoped flawfinder runner for code review

use anyhow::Result;
use clap::Parser;
use flawfinder_review::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let args = cli::Cli::parse();
    cli::run(args)
}
