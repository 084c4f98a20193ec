//! Core data models
//!
//! These models carry findings from the scanner's report through correlation
//! and out to the reporters.

use serde::{Deserialize, Serialize};

/// Severity levels for review messages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// One issue extracted from the scanner's report.
///
/// Produced only by [`crate::parser::parse_output`]; immutable afterwards.
/// `file_path` is whatever path the scanner echoed (the full path it was
/// invoked with), not yet resolved against the patch set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub file_path: String,
    pub line_number: u32,
    /// Always 0: flawfinder's text report carries no column information.
    pub column_number: u32,
    /// Tool-tagged description, e.g. `flawfinder: [4] (format) snprintf: ...`
    pub message: String,
    pub level: Severity,
}

/// One inline review comment, ready for the host review system.
///
/// `path` is patch-relative (as the reviewed change set names the file),
/// `line` is the new-file line number of the added line the finding landed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub path: String,
    pub line: u32,
    pub level: Severity,
    pub msg: String,
    /// Originating tool identifier, for hosts that compose multiple linters.
    pub runner: &'static str,
}
