//! Flawfinder report parser
//!
//! Flawfinder emits a fixed-grammar text report:
//!
//! ```text
//! Flawfinder version 2.0.19, (C) 2001-2019 David A. Wheeler.
//! Examining a.c
//!
//! FINAL RESULTS:
//!
//! a.c:4:  [4] (format) snprintf:
//!   If format strings can be influenced by an attacker, ...
//! a.c:5:  [1] (buffer) strlen:
//!   Does not handle strings that are not 0-terminated; ...
//!
//! ANALYSIS SUMMARY:
//!
//! Hits = 2
//! ...
//! ```
//!
//! Only the section between the two markers matters. Each finding block is one
//! `path:line:  [risk] (category) name:` line plus any number of wrapped
//! continuation lines, which are concatenated into a single message string.
//!
//! A report missing either marker (empty output, crashed scanner, truncated
//! pipe) parses to zero findings rather than an error.

use crate::models::{Finding, Severity};
use regex::Regex;
use std::sync::OnceLock;

/// Tag prepended to every message so hosts composing several linters can
/// tell the comments apart.
pub const MESSAGE_PREFIX: &str = "flawfinder: ";

const RESULTS_MARKER: &str = "FINAL RESULTS:";
const SUMMARY_MARKER: &str = "ANALYSIS SUMMARY:";

/// Matches the first line of a finding block: `a.c:4:  [4] (format) snprintf:`
fn finding_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\S+:\d+:\s*\[\d\]").expect("valid regex"))
}

/// Parse a full flawfinder stdout capture into structured findings.
///
/// Returns findings in report order (file order, then within-file order as
/// the scanner emitted them). Missing markers yield an empty vec.
pub fn parse_output(raw: &str) -> Vec<Finding> {
    let lines: Vec<&str> = raw.split('\n').map(|l| l.trim_end_matches('\r')).collect();

    let begin = lines.iter().position(|l| *l == RESULTS_MARKER);
    let end = lines.iter().position(|l| *l == SUMMARY_MARKER);
    let (begin, end) = match (begin, end) {
        (Some(b), Some(e)) => (b, e),
        _ => return Vec::new(),
    };

    // Skip the blank separator after FINAL RESULTS: and the blank line
    // before ANALYSIS SUMMARY:.
    let body = lines
        .get(begin + 2..end.saturating_sub(1))
        .unwrap_or_default();

    let re = finding_start_re();
    let mut blocks: Vec<String> = Vec::new();
    for line in body {
        if re.is_match(line) {
            blocks.push((*line).to_string());
        } else if let Some(current) = blocks.last_mut() {
            // Wrapped description text; the report indents it, and joining
            // without a separator preserves that indentation as spacing.
            current.push_str(line);
        }
    }

    blocks.iter().map(|b| parse_block(b)).collect()
}

/// Parse one joined finding block: `<path>:<line>:<message...>`.
fn parse_block(block: &str) -> Finding {
    let fields: Vec<&str> = block.trim().split(':').collect();

    let file_path = fields.first().copied().unwrap_or_default().to_string();
    let line_number = fields.get(1).and_then(|f| f.parse().ok()).unwrap_or(0);
    // The message itself contains colons (`snprintf:`), so rejoin the tail.
    let message = if fields.len() > 2 {
        fields[2..].join(":")
    } else {
        String::new()
    };

    Finding {
        file_path,
        line_number,
        column_number: 0,
        message: format!("{}{}", MESSAGE_PREFIX, message.trim()),
        level: Severity::Warning,
    }
}
