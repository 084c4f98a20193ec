//! Scanner invocation configuration
//!
//! Everything the runner needs to know about how to invoke the scanner is
//! passed in explicitly. Nothing here reads the process environment; the
//! CLI layer maps `FLAWFINDER_OPTS` into `extra_args` so the knob stays
//! visible and the library stays testable without mutating global state.

/// Configuration for a flawfinder invocation.
#[derive(Debug, Clone)]
pub struct FlawfinderConfig {
    /// Executable name or path. Defaults to `flawfinder` on PATH.
    pub executable: String,
    /// Extra command-line options, passed through verbatim as individual
    /// arguments (never via a shell).
    pub extra_args: Vec<String>,
    /// Seconds to wait before killing the scanner. 0 = no timeout.
    pub timeout_secs: u64,
}

impl Default for FlawfinderConfig {
    fn default() -> Self {
        Self {
            executable: "flawfinder".to_string(),
            extra_args: Vec::new(),
            timeout_secs: 0,
        }
    }
}

impl FlawfinderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the executable name or path.
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Append extra scanner options.
    pub fn with_extra_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.extra_args.extend(args);
        self
    }

    /// Set a timeout in seconds (0 disables it).
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
