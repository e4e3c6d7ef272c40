//! The supervising poll loop
//!
//! One supervising task drives the run: it sleeps for the poll interval,
//! then evaluates the tick checks in fixed priority order — completion
//! first, then timeout, then the external cancel signal. Completion winning
//! over a same-tick abort matters: a process that legitimately finished must
//! not be reported as timed out or cancelled.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::error::RunError;
use crate::supervisor::launch::{Launcher, RunHandle};
use crate::supervisor::signal::CancelSignal;
use crate::supervisor::spec::CommandSpec;

/// Caller-supplied mapping from process exit code to application status
pub type ExitCodeMapper<S> = Box<dyn Fn(i32) -> S + Send + Sync>;

/// Terminal classification of one supervised run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The process exited and yielded this code
    Completed(i32),
    /// The timeout expired before the process finished
    TimedOut,
    /// The external cancel signal requested abort
    Cancelled,
}

impl Outcome {
    /// Exit code for a completed run
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Outcome::Completed(code) => Some(*code),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }
}

/// Supervised command runner
///
/// Built once via [`Supervisor::builder`], which validates the
/// configuration eagerly; each [`execute`](Self::execute) call is then an
/// independent invocation with its own process, worker and clock, so
/// concurrent calls are safe.
pub struct Supervisor<S> {
    spec: CommandSpec,
    mapper: ExitCodeMapper<S>,
    launcher: Box<dyn Launcher>,
}

impl<S> Supervisor<S> {
    /// Start building a supervisor for `command`
    pub fn builder(command: impl Into<String>) -> SupervisorBuilder<S> {
        SupervisorBuilder::new(command)
    }

    /// The validated spec this supervisor runs
    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    /// Execute the command under supervision
    ///
    /// Produces exactly one terminal state per call:
    /// `Ok(Outcome::Completed(code))`, or one of the [`RunError`] variants.
    /// A timeout or cancellation requests best-effort cancellation of the
    /// worker (honoring the interrupt-on-cancel flag) before failing. The
    /// elapsed-time clock is stopped and logged on every exit path.
    pub async fn execute(&self, cancel: &dyn CancelSignal) -> Result<Outcome, RunError> {
        self.supervise(cancel).await.map(Outcome::Completed)
    }

    /// Execute and map the exit code to an application status
    ///
    /// The mapper is invoked only on a genuine `Completed` outcome; timeout
    /// and cancellation propagate as errors untouched.
    pub async fn run(&self, cancel: &dyn CancelSignal) -> Result<S, RunError> {
        let code = self.supervise(cancel).await?;
        Ok((self.mapper)(code))
    }

    /// Launch, poll to a terminal state, and stop the clock
    ///
    /// Successful completion yields the exit code; timeout and cancellation
    /// become the corresponding errors here, so both public entry points
    /// share one terminal-state mapping.
    async fn supervise(&self, cancel: &dyn CancelSignal) -> Result<i32, RunError> {
        let handle = self.launcher.launch(&self.spec)?;
        let started = handle.started();

        let result = self.poll(handle, cancel).await;

        let elapsed = started.elapsed();
        debug!(command = %self.spec.command, ?elapsed, "run finished");

        match result? {
            Outcome::Completed(code) => Ok(code),
            Outcome::TimedOut => Err(RunError::Timeout {
                command: self.spec.command.clone(),
                timeout: self.spec.timeout,
                elapsed,
            }),
            Outcome::Cancelled => Err(RunError::Cancelled {
                command: self.spec.command.clone(),
            }),
        }
    }

    /// Tick loop: sleep one interval, then check completion, timeout and the
    /// external signal, in that order.
    async fn poll(
        &self,
        handle: RunHandle,
        cancel: &dyn CancelSignal,
    ) -> Result<Outcome, RunError> {
        loop {
            sleep(self.spec.poll_interval).await;

            if handle.is_finished() {
                let code = handle.exit_code(&self.spec.command).await?;
                return Ok(Outcome::Completed(code));
            }

            // Strict greater-than: elapsed == timeout is not yet a timeout.
            if handle.elapsed() > self.spec.timeout {
                handle.cancel(self.spec.interrupt_on_cancel);
                return Ok(Outcome::TimedOut);
            }

            if cancel.should_cancel() {
                handle.cancel(self.spec.interrupt_on_cancel);
                return Ok(Outcome::Cancelled);
            }
        }
    }
}

/// Builder for [`Supervisor`]
///
/// Collects the spec, the exit-code mapper and the launcher;
/// [`build`](Self::build) runs the full validation and rejects incomplete
/// setups before any execution is accepted.
pub struct SupervisorBuilder<S> {
    spec: CommandSpec,
    mapper: Option<ExitCodeMapper<S>>,
    launcher: Option<Box<dyn Launcher>>,
}

impl<S> SupervisorBuilder<S> {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            spec: CommandSpec::new(command),
            mapper: None,
            launcher: None,
        }
    }

    /// Set the timeout (required, must be greater than zero)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.spec.timeout = timeout;
        self
    }

    /// Set the interval between termination checks (default 1 second)
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.spec.poll_interval = interval;
        self
    }

    /// Set the working directory for the spawned process
    pub fn working_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.spec.working_dir = Some(dir.into());
        self
    }

    /// Replace the spawned process's environment
    pub fn env(mut self, vars: Vec<(String, String)>) -> Self {
        self.spec.env = Some(vars);
        self
    }

    /// Interrupt the waiting worker when a run is aborted (default false)
    pub fn interrupt_on_cancel(mut self, interrupt: bool) -> Self {
        self.spec.interrupt_on_cancel = interrupt;
        self
    }

    /// Set the exit-code mapper (required)
    pub fn mapper(mut self, mapper: impl Fn(i32) -> S + Send + Sync + 'static) -> Self {
        self.mapper = Some(Box::new(mapper));
        self
    }

    /// Set the process launcher (required)
    pub fn launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.launcher = Some(Box::new(launcher));
        self
    }

    /// Validate the collected configuration without consuming the builder
    ///
    /// Idempotent: repeated calls on the same builder yield the same
    /// verdict.
    pub fn validate(&self) -> Result<(), RunError> {
        self.spec.validate()?;
        if self.mapper.is_none() {
            return Err(RunError::configuration("exit-code mapper must be set"));
        }
        if self.launcher.is_none() {
            return Err(RunError::configuration("launcher must be set"));
        }
        Ok(())
    }

    /// Validate and build the supervisor
    pub fn build(self) -> Result<Supervisor<S>, RunError> {
        self.validate()?;
        // validate() guarantees both are present.
        let mapper = self
            .mapper
            .ok_or_else(|| RunError::configuration("exit-code mapper must be set"))?;
        let launcher = self
            .launcher
            .ok_or_else(|| RunError::configuration("launcher must be set"))?;
        Ok(Supervisor {
            spec: self.spec,
            mapper,
            launcher,
        })
    }
}
