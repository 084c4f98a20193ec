//! Finding-to-diff correlation
//!
//! The scanner analyzes whole files, so most of its findings concern code
//! the change under review never touched. Correlation keeps only findings
//! that land exactly on an added line: same resolved file path, same
//! new-file line number. Everything else is dropped silently — a flaw on an
//! unmodified line is not actionable in this review.

use crate::models::Finding;
use crate::patch::{DiffLine, Patch};

/// A finding matched to the added line it concerns.
#[derive(Debug)]
pub struct Correlation<'a> {
    pub finding: &'a Finding,
    pub patch: &'a Patch,
    pub line: &'a DiffLine,
}

/// Match findings against the patch set.
///
/// Patch lookup is first-match by iteration order (paths are unique per
/// change set, so order never matters in practice). Output preserves the
/// relative order of the findings that matched.
pub fn correlate<'a>(findings: &'a [Finding], patches: &'a [Patch]) -> Vec<Correlation<'a>> {
    findings
        .iter()
        .filter_map(|finding| {
            let patch = patches
                .iter()
                .find(|p| p.new_file_full_path.to_string_lossy() == finding.file_path)?;
            let line = patch
                .added_lines
                .iter()
                .find(|l| l.new_lineno == finding.line_number)?;
            Some(Correlation {
                finding,
                patch,
                line,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use std::path::PathBuf;

    fn make_finding(file: &str, line: u32) -> Finding {
        Finding {
            file_path: file.to_string(),
            line_number: line,
            column_number: 0,
            message: "flawfinder: [5] (buffer) gets:".to_string(),
            level: Severity::Warning,
        }
    }

    fn make_patch(full_path: &str, added: &[u32]) -> Patch {
        Patch {
            new_file_path: PathBuf::from(
                full_path.strip_prefix("/repo/").unwrap_or(full_path),
            ),
            new_file_full_path: PathBuf::from(full_path),
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
    fn test_match_on_added_line() {
        let findings = vec![make_finding("/repo/a.c", 4)];
        let patches = vec![make_patch("/repo/a.c", &[3, 4, 5])];

        let matched = correlate(&findings, &patches);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].line.new_lineno, 4);
        assert_eq!(matched[0].patch.new_file_path, PathBuf::from("a.c"));
    }

    #[test]
    fn test_discard_when_no_patch_for_file() {
        let findings = vec![make_finding("/repo/other.c", 4)];
        let patches = vec![make_patch("/repo/a.c", &[4])];
        assert!(correlate(&findings, &patches).is_empty());
    }

    #[test]
    fn test_discard_when_line_not_added() {
        let findings = vec![make_finding("/repo/a.c", 7)];
        let patches = vec![make_patch("/repo/a.c", &[3, 4, 5])];
        assert!(correlate(&findings, &patches).is_empty());
    }

    #[test]
    fn test_preserves_finding_order() {
        let findings = vec![
            make_finding("/repo/b.c", 2),
            make_finding("/repo/a.c", 9), // not added, dropped
            make_finding("/repo/a.c", 4),
        ];
        let patches = vec![
            make_patch("/repo/a.c", &[3, 4, 5]),
            make_patch("/repo/b.c", &[2]),
        ];

        let matched = correlate(&findings, &patches);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].finding.file_path, "/repo/b.c");
        assert_eq!(matched[1].finding.line_number, 4);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(correlate(&[], &[]).is_empty());
        assert!(correlate(&[make_finding("/repo/a.c", 1)], &[]).is_empty());
        assert!(correlate(&[], &[make_patch("/repo/a.c", &[1])]).is_empty());
    }
}
