//! Patch model and git-backed patch extraction
//!
//! The core pipeline only ever reads patches: which files gained lines, and
//! the new-file line numbers of those added lines. Deleted and context lines
//! are never recorded, so a finding can only ever correlate to code the
//! change under review actually introduced.
//!
//! [`repo_patches`] builds the patch set from a git repository using the
//! git2 crate (Rust bindings to libgit2), diffing the merge base of a base
//! ref and HEAD against HEAD — the same change set a reviewer sees.

use anyhow::{Context, Result};
use git2::{DiffOptions, Repository};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One line added by a patch, identified by its new-file line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub new_lineno: u32,
    /// Line text without the trailing newline.
    pub content: String,
}

/// The changes to a single file within the reviewed change set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Path as the change set names it, relative to the repository root.
    pub new_file_path: PathBuf,
    /// Path resolved against the repository root; this is what the scanner
    /// is invoked with and what its report echoes back.
    pub new_file_full_path: PathBuf,
    /// Number of added lines.
    pub additions: usize,
    /// Added lines in hunk order.
    pub added_lines: Vec<DiffLine>,
}

impl Patch {
    pub fn has_additions(&self) -> bool {
        self.additions > 0
    }
}

/// Resolve the working repository's root directory.
pub fn repo_root(path: &Path) -> Result<PathBuf> {
    let repo = Repository::discover(path)
        .with_context(|| format!("Failed to open git repository at {:?}", path))?;
    repo.workdir()
        .map(Path::to_path_buf)
        .context("Repository has no working directory (bare repo?)")
}

/// Extract the patch set between `base_ref` and HEAD.
///
/// Diffs from the merge base of `base_ref` and HEAD, so commits on the base
/// branch after the review branch forked do not pollute the change set.
pub fn repo_patches(path: &Path, base_ref: &str) -> Result<Vec<Patch>> {
    let repo = Repository::discover(path)
        .with_context(|| format!("Failed to open git repository at {:?}", path))?;
    let workdir = repo
        .workdir()
        .context("Repository has no working directory (bare repo?)")?
        .to_path_buf();

    let base = repo
        .revparse_single(base_ref)
        .with_context(|| format!("Unknown base ref '{}'", base_ref))?
        .peel_to_commit()
        .with_context(|| format!("Base ref '{}' does not point at a commit", base_ref))?;
    let head = repo
        .head()
        .context("Failed to resolve HEAD")?
        .peel_to_commit()
        .context("HEAD does not point at a commit")?;

    let merge_base = repo
        .merge_base(base.id(), head.id())
        .with_context(|| format!("No merge base between '{}' and HEAD", base_ref))?;
    let base_tree = repo.find_commit(merge_base)?.tree()?;
    let head_tree = head.tree()?;

    let mut opts = DiffOptions::new();
    let diff = repo.diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))?;

    let mut patches = Vec::new();
    for idx in 0..diff.deltas().len() {
        let git_patch = match git2::Patch::from_diff(&diff, idx)? {
            Some(p) => p,
            None => continue, // binary delta
        };
        let rel = match git_patch.delta().new_file().path() {
            Some(p) => p.to_path_buf(),
            None => continue,
        };

        let mut added_lines = Vec::new();
        for hunk_idx in 0..git_patch.num_hunks() {
            let line_count = git_patch.num_lines_in_hunk(hunk_idx)?;
            for line_idx in 0..line_count {
                let line = git_patch.line_in_hunk(hunk_idx, line_idx)?;
                if line.origin() != '+' {
                    continue;
                }
                if let Some(new_lineno) = line.new_lineno() {
                    added_lines.push(DiffLine {
                        new_lineno,
                        content: String::from_utf8_lossy(line.content())
                            .trim_end_matches(['\n', '\r'])
                            .to_string(),
                    });
                }
            }
        }

        let new_file_full_path = workdir.join(&rel);
        patches.push(Patch {
            new_file_path: rel,
            new_file_full_path,
            additions: added_lines.len(),
            added_lines,
        });
    }

    debug!(
        "Extracted {} patches from {}..HEAD",
        patches.len(),
        base_ref
    );
    Ok(patches)
}
