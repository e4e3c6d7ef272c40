//! Immutable configuration for one supervised command run

use std::path::PathBuf;
use std::time::Duration;

use crate::error::RunError;

/// Default interval between termination checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for a single supervised command run
///
/// The command string is tokenized on whitespace into an executable and its
/// arguments. When `env` is set, it fully replaces the inherited environment
/// of the spawned process; when unset, the process inherits the parent's.
/// The working directory defaults to the host's current directory.
///
/// A `CommandSpec` is read-only after [`validate`](Self::validate) and is
/// never mutated during execution.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Command line to execute (executable followed by arguments)
    pub command: String,
    /// Environment overrides; replaces the entire inherited environment
    pub env: Option<Vec<(String, String)>>,
    /// Working directory for the spawned process
    pub working_dir: Option<PathBuf>,
    /// Upper limit for how long the command may run (required, > 0)
    pub timeout: Duration,
    /// Interval between termination checks
    pub poll_interval: Duration,
    /// Whether to interrupt the waiting worker when a run is aborted
    pub interrupt_on_cancel: bool,
}

impl CommandSpec {
    /// Create a spec for `command` with defaults
    ///
    /// The timeout starts out as zero and must be set before validation
    /// passes.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            env: None,
            working_dir: None,
            timeout: Duration::ZERO,
            poll_interval: DEFAULT_POLL_INTERVAL,
            interrupt_on_cancel: false,
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the working directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Replace the spawned process's environment with `vars`
    pub fn with_env(mut self, vars: Vec<(String, String)>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Set the interrupt-on-cancel flag
    pub fn with_interrupt_on_cancel(mut self, interrupt: bool) -> Self {
        self.interrupt_on_cancel = interrupt;
        self
    }

    /// Validate this spec
    ///
    /// Pure precondition check with no side effects; calling it twice on the
    /// same spec yields the same verdict. Fails with
    /// [`RunError::Configuration`] when the command is empty, the timeout is
    /// not greater than zero, or a working directory is set but missing or
    /// not a directory.
    pub fn validate(&self) -> Result<(), RunError> {
        if self.command.trim().is_empty() {
            return Err(RunError::configuration("command must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(RunError::configuration(
                "timeout must be greater than zero",
            ));
        }
        if let Some(ref dir) = self.working_dir {
            if !dir.exists() {
                return Err(RunError::configuration(format!(
                    "working directory does not exist: {}",
                    dir.display()
                )));
            }
            if !dir.is_dir() {
                return Err(RunError::configuration(format!(
                    "working directory is not a directory: {}",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Split the command string into executable and arguments
    ///
    /// Returns `None` for an all-whitespace command; `validate` rejects that
    /// case before any launch.
    pub fn program_and_args(&self) -> Option<(&str, Vec<&str>)> {
        let mut tokens = self.command.split_whitespace();
        let program = tokens.next()?;
        Some((program, tokens.collect()))
    }
}
