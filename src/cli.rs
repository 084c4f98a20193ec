//! CLI definition and handler

use crate::config::FlawfinderConfig;
use crate::patch;
use crate::reporters::{self, OutputFormat};
use crate::runner::FlawfinderRunner;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Flawfinder review adapter
///
/// Runs the flawfinder C/C++ security scanner over the files a change
/// touched and reports only the findings that land on lines the change
/// actually added.
#[derive(Parser, Debug)]
#[command(name = "flawfinder-review")]
#[command(
    version,
    about = "Diff-scoped flawfinder runner — flag only the C/C++ flaws your change introduced",
    after_help = "\
Examples:
  flawfinder-review .                        Review HEAD against main
  flawfinder-review . --base origin/develop  Review against another base
  flawfinder-review . --format json          JSON output for scripting
  FLAWFINDER_OPTS='--minlevel 2' flawfinder-review .   Pass scanner options"
)]
pub struct Cli {
    /// Path to repository (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Base ref to diff HEAD against
    #[arg(long, default_value = "main")]
    pub base: String,

    /// Output format: text, json
    #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Flawfinder executable name or path
    #[arg(long, default_value = "flawfinder")]
    pub executable: String,

    /// Extra flawfinder options, whitespace-split into arguments
    #[arg(long, env = "FLAWFINDER_OPTS", allow_hyphen_values = true)]
    pub flawfinder_opts: Option<String>,

    /// Seconds before the scanner is killed (0 = no timeout)
    #[arg(long, default_value = "0")]
    pub timeout: u64,
}

/// Run the pipeline and print the rendered messages.
pub fn run(cli: Cli) -> Result<()> {
    let root = patch::repo_root(&cli.path)?;
    let patches = patch::repo_patches(&cli.path, &cli.base)?;

    let extra_args = cli
        .flawfinder_opts
        .as_deref()
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string);
    let config = FlawfinderConfig::new()
        .with_executable(cli.executable)
        .with_extra_args(extra_args)
        .with_timeout_secs(cli.timeout);

    let runner = FlawfinderRunner::new(patches, root, config);
    let messages = runner.run();

    let format = OutputFormat::from_str(&cli.format)?;
    print!("{}", reporters::render(&messages, format)?);
    Ok(())
}
