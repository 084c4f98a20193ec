//! Subprocess invocation for the external scanner
//!
//! The scanner is spawned with an argument vector via `std::process::Command`
//! — never through a shell — so file paths need no escaping and free-form
//! extra options cannot grow into a command of their own.
//!
//! A timeout of 0 disables enforcement (the default: the scanner is trusted
//! to terminate). Non-zero timeouts use a poll-and-kill loop.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Captured output from a completed tool run.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, if the process exited normally. Not inspected by the
    /// pipeline: flawfinder exits non-zero whenever it has hits.
    pub return_code: Option<i32>,
}

/// Why a tool run produced no output at all.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{tool} not found in PATH")]
    NotFound { tool: String },
    #[error("{tool} timed out after {timeout_secs}s")]
    TimedOut { tool: String, timeout_secs: u64 },
    #[error("failed to run {tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

/// Run `cmd` to completion and capture its output.
///
/// # Arguments
/// * `cmd` - Program and arguments
/// * `tool_name` - Human-readable tool name for logs and errors
/// * `timeout_secs` - 0 = wait forever
/// * `cwd` - Working directory for the child process; the parent's own
///   working directory is never touched
pub fn run_tool(
    cmd: &[String],
    tool_name: &str,
    timeout_secs: u64,
    cwd: Option<&Path>,
) -> Result<ToolResult, ToolError> {
    let (program, args) = cmd.split_first().ok_or_else(|| ToolError::Io {
        tool: tool_name.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
    })?;

    debug!("Running {}: {} {:?}", tool_name, program, args);

    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    if timeout_secs == 0 {
        let output = command.output().map_err(|e| map_spawn_error(tool_name, e))?;
        return Ok(ToolResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            return_code: output.status.code(),
        });
    }

    let child = command.spawn().map_err(|e| map_spawn_error(tool_name, e))?;
    wait_with_timeout(child, tool_name, timeout_secs)
}

fn map_spawn_error(tool_name: &str, e: std::io::Error) -> ToolError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ToolError::NotFound {
            tool: tool_name.to_string(),
        }
    } else {
        ToolError::Io {
            tool: tool_name.to_string(),
            source: e,
        }
    }
}

/// Poll for completion, killing the child once the deadline passes.
fn wait_with_timeout(
    mut child: std::process::Child,
    tool_name: &str,
    timeout_secs: u64,
) -> Result<ToolResult, ToolError> {
    use std::io::Read;

    let start = Instant::now();
    let timeout = Duration::from_secs(timeout_secs);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let mut stdout = String::new();
                let mut stderr = String::new();
                if let Some(mut s) = child.stdout.take() {
                    let _ = s.read_to_string(&mut stdout);
                }
                if let Some(mut s) = child.stderr.take() {
                    let _ = s.read_to_string(&mut stderr);
                }
                return Ok(ToolResult {
                    stdout,
                    stderr,
                    return_code: status.code(),
                });
            }
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    warn!("{} timed out after {}s", tool_name, timeout_secs);
                    return Err(ToolError::TimedOut {
                        tool: tool_name.to_string(),
                        timeout_secs,
                    });
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => {
                return Err(ToolError::Io {
                    tool: tool_name.to_string(),
                    source: e,
                })
            }
        }
    }
}
