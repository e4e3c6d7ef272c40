//! Process launch and the per-run handle
//!
//! Launching spawns the OS process and a worker task whose only job is the
//! blocking wait-for-exit, keeping that wait off the supervising control
//! flow. The [`Launcher`] is an explicit field of each supervisor instance;
//! there is no process-wide default.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::RunError;
use crate::supervisor::spec::CommandSpec;

/// Process launch strategy
///
/// Spawns the process described by a validated [`CommandSpec`] and returns a
/// [`RunHandle`] whose worker yields the numeric exit code. Spawn failures
/// surface immediately as [`RunError::Launch`]; they are never deferred to
/// the poll loop.
pub trait Launcher: Send + Sync {
    fn launch(&self, spec: &CommandSpec) -> Result<RunHandle, RunError>;
}

/// One in-flight invocation: the waiting worker plus the elapsed-time clock
///
/// Exists only for the duration of one `execute` call and is not reused.
/// Dropping the handle abandons the worker without interrupting it.
#[derive(Debug)]
pub struct RunHandle {
    worker: JoinHandle<std::io::Result<i32>>,
    started: Instant,
}

impl RunHandle {
    /// Wrap a worker task; the clock starts now
    pub fn new(worker: JoinHandle<std::io::Result<i32>>) -> Self {
        Self {
            worker,
            started: Instant::now(),
        }
    }

    /// Instant the run was launched
    pub fn started(&self) -> Instant {
        self.started
    }

    /// Time elapsed since launch
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whether the worker has finished (process exited or wait failed)
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Retrieve the exit code from a finished worker
    ///
    /// A failure inside the worker (the wait call itself, or a panic)
    /// surfaces as [`RunError::Execution`].
    pub async fn exit_code(self, command: &str) -> Result<i32, RunError> {
        match self.worker.await {
            Ok(Ok(code)) => Ok(code),
            Ok(Err(io)) => Err(RunError::Execution {
                command: command.to_string(),
                message: io.to_string(),
            }),
            Err(join) => Err(RunError::Execution {
                command: command.to_string(),
                message: join.to_string(),
            }),
        }
    }

    /// Best-effort cancellation of the worker
    ///
    /// With `interrupt` set, the worker task is aborted so its blocking wait
    /// unwinds promptly. Either way the spawned process itself is left
    /// untouched and may keep running until the OS reclaims it.
    pub fn cancel(&self, interrupt: bool) {
        if interrupt {
            self.worker.abort();
        } else {
            warn!(
                elapsed = ?self.elapsed(),
                "abandoning still-running worker; process may outlive this run"
            );
        }
    }
}

/// Stock launcher backed by the Tokio runtime
///
/// Child stdio is wired to null: output capture is out of scope for the
/// supervisor, and unread pipes would otherwise fill and block the child.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLauncher;

impl TokioLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Launcher for TokioLauncher {
    fn launch(&self, spec: &CommandSpec) -> Result<RunHandle, RunError> {
        let (program, args) = spec.program_and_args().ok_or_else(|| {
            // validate() rejects this before launch; kept as a launch error
            // for callers that skip validation.
            RunError::configuration("command must not be empty")
        })?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if let Some(ref dir) = spec.working_dir {
            cmd.current_dir(dir);
        }

        if let Some(ref vars) = spec.env {
            // Overrides replace the inherited environment entirely.
            cmd.env_clear();
            cmd.envs(vars.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let mut child = cmd.spawn().map_err(|e| RunError::Launch {
            command: spec.command.clone(),
            source: e,
        })?;

        debug!(pid = ?child.id(), command = %spec.command, "process spawned");

        // No kill_on_drop: aborting or abandoning the worker must not kill
        // the child; reclaiming it is the operating environment's job.
        let worker = tokio::spawn(async move {
            let status = child.wait().await?;
            Ok(status.code().unwrap_or(-1))
        });

        Ok(RunHandle::new(worker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(command: &str) -> CommandSpec {
        CommandSpec::new(command).with_timeout(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_launch_and_exit_code() {
        let handle = TokioLauncher::new().launch(&spec("true")).unwrap();
        let code = handle.exit_code("true").await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_launch_nonzero_exit_code() {
        let handle = TokioLauncher::new().launch(&spec("false")).unwrap();
        let code = handle.exit_code("false").await.unwrap();
        assert_eq!(code, 1);
    }

    #[tokio::test]
    async fn test_launch_missing_executable_fails_immediately() {
        let err = TokioLauncher::new()
            .launch(&spec("cmdwarden_no_such_binary_12345"))
            .unwrap_err();
        assert!(matches!(err, RunError::Launch { .. }));
        assert!(err.to_string().contains("cmdwarden_no_such_binary_12345"));
    }

    #[tokio::test]
    async fn test_handle_reports_finished() {
        let handle = TokioLauncher::new().launch(&spec("true")).unwrap();
        // Give the process a moment to exit.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_cancel_with_interrupt_aborts_worker() {
        let handle = TokioLauncher::new().launch(&spec("sleep 30")).unwrap();
        handle.cancel(true);
        let err = handle.exit_code("sleep 30").await.unwrap_err();
        assert!(matches!(err, RunError::Execution { .. }));
    }

    #[tokio::test]
    async fn test_working_dir_is_applied() {
        let dir = tempfile::TempDir::new().unwrap();
        let spec = spec("true").in_dir(dir.path());
        let handle = TokioLauncher::new().launch(&spec).unwrap();
        assert_eq!(handle.exit_code("true").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_env_override_replaces_environment() {
        // Absolute path: with a cleared environment there is no PATH to
        // resolve the program against.
        let spec =
            spec("/usr/bin/env").with_env(vec![("ONLY_VAR".to_string(), "1".to_string())]);
        let handle = TokioLauncher::new().launch(&spec).unwrap();
        assert_eq!(handle.exit_code("/usr/bin/env").await.unwrap(), 0);
    }
}
