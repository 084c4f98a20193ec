//! flawfinder-review - Diff-scoped review adapter for flawfinder
//!
//! Integrates the flawfinder C/C++ security scanner into code-review
//! automation: run the scanner over the files a change set touched, parse
//! its text report, and keep only the findings that land on lines the
//! change actually added — pre-existing flaws never show up as review
//! comments.
//!
//! Pipeline: patches → changed C/C++ files → flawfinder subprocess →
//! report parser → diff correlator → review messages.

pub mod cli;
pub mod config;
pub mod correlate;
pub mod exec;
pub mod models;
pub mod parser;
pub mod patch;
pub mod reporters;
pub mod runner;

pub use config::FlawfinderConfig;
pub use models::{Finding, Message, Severity};
pub use patch::{repo_patches, repo_root, DiffLine, Patch};
pub use runner::FlawfinderRunner;
