//! The flawfinder review runner
//!
//! Glues the pieces together: select changed C/C++ files from the patch
//! set, invoke flawfinder on them, parse its report, correlate findings
//! onto added lines, and emit one review message per match.
//!
//! Every failure mode degrades to zero messages. A missing scanner, a
//! crashed scanner, a truncated report — none of them should fail the
//! review run itself.

use crate::config::FlawfinderConfig;
use crate::correlate::correlate;
use crate::exec::run_tool;
use crate::models::{Finding, Message};
use crate::parser::parse_output;
use crate::patch::Patch;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Identifier attached to every emitted message.
pub const RUNNER_NAME: &str = "flawfinder";

/// File extensions flawfinder is asked to look at (case-sensitive).
pub const CPP_FILE_EXTENSIONS: [&str; 4] = ["c", "cpp", "h", "hpp"];

/// Whether a path names a C/C++ source or header file.
pub fn is_cpp_file(file: &str) -> bool {
    CPP_FILE_EXTENSIONS
        .iter()
        .any(|ext| file.strip_suffix(*ext).is_some_and(|rest| rest.ends_with('.')))
}

/// Keep only C/C++ files, preserving order.
pub fn filter_cpp_files(files: &[String]) -> Vec<String> {
    files.iter().filter(|f| is_cpp_file(f)).cloned().collect()
}

/// Runs flawfinder against a change set and maps findings to added lines.
pub struct FlawfinderRunner {
    patches: Vec<Patch>,
    repo_root: PathBuf,
    config: FlawfinderConfig,
}

impl FlawfinderRunner {
    /// Create a runner for one change set.
    ///
    /// `repo_root` becomes the scanner's working directory.
    pub fn new(patches: Vec<Patch>, repo_root: impl Into<PathBuf>, config: FlawfinderConfig) -> Self {
        Self {
            patches,
            repo_root: repo_root.into(),
            config,
        }
    }

    /// Full paths of all files the change set added lines to.
    pub fn files(&self) -> Vec<String> {
        self.patches
            .iter()
            .filter(|p| p.has_additions())
            .map(|p| p.new_file_full_path.to_string_lossy().to_string())
            .collect()
    }

    /// Run the full pipeline. Never fails; see module docs.
    pub fn run(&self) -> Vec<Message> {
        let cpp_files = filter_cpp_files(&self.files());
        if cpp_files.is_empty() {
            debug!("No changed C/C++ files, skipping flawfinder");
            return Vec::new();
        }

        let findings = self.run_flawfinder(&cpp_files);
        let messages = self.messages(&findings);
        info!(
            "flawfinder reported {} findings, {} on added lines",
            findings.len(),
            messages.len()
        );
        messages
    }

    /// Invoke the scanner and parse whatever it printed.
    ///
    /// Exit status is deliberately ignored: flawfinder exits non-zero
    /// whenever it has hits, so the report text is the only contract.
    fn run_flawfinder(&self, cpp_files: &[String]) -> Vec<Finding> {
        let mut cmd =
            Vec::with_capacity(1 + self.config.extra_args.len() + cpp_files.len());
        cmd.push(self.config.executable.clone());
        cmd.extend(self.config.extra_args.iter().cloned());
        cmd.extend(cpp_files.iter().cloned());

        match run_tool(
            &cmd,
            RUNNER_NAME,
            self.config.timeout_secs,
            Some(&self.repo_root),
        ) {
            Ok(result) => parse_output(&result.stdout),
            Err(e) => {
                warn!("flawfinder run failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Map correlated findings into review messages.
    fn messages(&self, findings: &[Finding]) -> Vec<Message> {
        correlate(findings, &self.patches)
            .into_iter()
            .map(|c| Message {
                path: c.patch.new_file_path.to_string_lossy().to_string(),
                line: c.line.new_lineno,
                level: c.finding.level,
                msg: c.finding.message.clone(),
                runner: RUNNER_NAME,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use crate::patch::DiffLine;

    #[test]
    fn test_filter_cpp_files() {
        let files: Vec<String> = [
            "test.py", "test.c", "test.txt", "test.cpp", "test.rb", "test.h", "test.hpp",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let filtered = filter_cpp_files(&files);
        assert_eq!(filtered, vec!["test.c", "test.cpp", "test.h", "test.hpp"]);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        assert!(is_cpp_file("main.c"));
        assert!(!is_cpp_file("main.C"));
        assert!(!is_cpp_file("main.CPP"));
    }

    #[test]
    fn test_filter_requires_extension_separator() {
        // "blah" ends with "h" but is not a header file
        assert!(!is_cpp_file("blah"));
        assert!(!is_cpp_file("matchpp"));
        assert!(is_cpp_file("a.b.hpp"));
    }

    fn make_patch(full: &str, rel: &str, added: &[u32]) -> Patch {
        Patch {
            new_file_path: rel.into(),
            new_file_full_path: full.into(),
            additions: added.len(),
            added_lines: added
                .iter()
                .map(|&n| DiffLine {
                    new_lineno: n,
                    content: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_files_skips_patches_without_additions() {
        let patches = vec![
            make_patch("/repo/a.c", "a.c", &[1, 2]),
            make_patch("/repo/deleted.c", "deleted.c", &[]),
        ];
        let runner = FlawfinderRunner::new(patches, "/repo", FlawfinderConfig::default());
        assert_eq!(runner.files(), vec!["/repo/a.c"]);
    }

    #[test]
    fn test_run_with_no_patches_is_empty() {
        let runner = FlawfinderRunner::new(vec![], "/repo", FlawfinderConfig::default());
        assert!(runner.run().is_empty());
    }

    #[test]
    fn test_run_with_no_cpp_candidates_is_empty() {
        // Executable would fail if invoked; the filter must short-circuit first.
        let config = FlawfinderConfig::new().with_executable("no-such-scanner-xyz");
        let patches = vec![make_patch("/repo/notes.rst", "notes.rst", &[1])];
        let runner = FlawfinderRunner::new(patches, "/repo", config);
        assert!(runner.run().is_empty());
    }

    #[test]
    fn test_missing_scanner_fails_open() {
        let config = FlawfinderConfig::new().with_executable("no-such-scanner-xyz");
        let patches = vec![make_patch("/repo/a.c", "a.c", &[1])];
        let runner = FlawfinderRunner::new(patches, "/repo", config);
        assert!(runner.run().is_empty());
    }

    #[test]
    fn test_messages_use_patch_relative_path() {
        let patches = vec![make_patch("/repo/src/a.c", "src/a.c", &[4])];
        let runner = FlawfinderRunner::new(patches, "/repo", FlawfinderConfig::default());

        let findings = vec![Finding {
            file_path: "/repo/src/a.c".to_string(),
            line_number: 4,
            column_number: 0,
            message: "flawfinder: [4] (format) snprintf: bad".to_string(),
            level: Severity::Warning,
        }];

        let messages = runner.messages(&findings);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].path, "src/a.c");
        assert_eq!(messages[0].line, 4);
        assert_eq!(messages[0].level, Severity::Warning);
        assert_eq!(messages[0].runner, RUNNER_NAME);
    }

    #[test]
    fn test_messages_discard_uncorrelated_findings() {
        let patches = vec![make_patch("/repo/a.c", "a.c", &[4])];
        let runner = FlawfinderRunner::new(patches, "/repo", FlawfinderConfig::default());

        let findings = vec![
            Finding {
                file_path: "/repo/a.c".to_string(),
                line_number: 99,
                column_number: 0,
                message: "flawfinder: on an untouched line".to_string(),
                level: Severity::Warning,
            },
            Finding {
                file_path: "/repo/elsewhere.c".to_string(),
                line_number: 4,
                column_number: 0,
                message: "flawfinder: in an untouched file".to_string(),
                level: Severity::Warning,
            },
        ];

        assert!(runner.messages(&findings).is_empty());
    }
}
