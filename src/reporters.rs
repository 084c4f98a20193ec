//! Output rendering for review messages
//!
//! Two formats:
//! - `text` - one styled line per message for terminals
//! - `json` - machine-readable, for piping into other review tooling

use crate::models::Message;
use anyhow::{anyhow, Result};
use console::style;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Keep in sync with the CLI's --format value parser.
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

/// Render messages in the specified format.
pub fn render(messages: &[Message], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(messages)),
        OutputFormat::Json => render_json(messages),
    }
}

fn render_text(messages: &[Message]) -> String {
    if messages.is_empty() {
        return format!("{}\n", style("No flaws on added lines.").green());
    }

    let mut out = String::new();
    for m in messages {
        out.push_str(&format!(
            "{}:{} {} {}\n",
            style(&m.path).cyan(),
            m.line,
            style(format!("[{}]", m.level)).yellow(),
            m.msg
        ));
    }
    out.push_str(&format!(
        "\n{} message(s) on added lines\n",
        style(messages.len()).bold()
    ));
    out
}

fn render_json(messages: &[Message]) -> Result<String> {
    Ok(serde_json::to_string_pretty(messages)?)
}
