//! cmdwarden - Supervised Command Runner
//!
//! Drives one asynchronous invocation of an external command to completion
//! under two competing deadlines:
//!
//! - a **hard timeout**, enforced by the runner itself
//! - an **external cancel signal**, polled once per tick
//!
//! The supervisor polls at a configurable interval with a fixed per-tick
//! priority (completion, then timeout, then cancel) and converts the result
//! into a typed outcome. The process exit code is mapped to an
//! application-level status by a caller-supplied function.
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use cmdwarden::{CancelFlag, Supervisor, TokioLauncher};
//!
//! # async fn demo() -> Result<(), cmdwarden::RunError> {
//! let supervisor = Supervisor::builder("pg_dump mydb")
//!     .timeout(Duration::from_secs(600))
//!     .poll_interval(Duration::from_millis(500))
//!     .mapper(|code| code == 0)
//!     .launcher(TokioLauncher::new())
//!     .build()?;
//!
//! let cancel = CancelFlag::new();
//! let ok = supervisor.run(&cancel).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Aborting a run is best-effort: the spawned process itself is never
//! killed by the supervisor and may outlive the call; the operating
//! environment reclaims it.

pub mod cli;
pub mod config;
pub mod error;
pub mod status;
pub mod supervisor;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::RunError;
pub use status::StepStatus;
pub use supervisor::{
    CancelFlag, CancelSignal, CommandSpec, ExitCodeMapper, Launcher, Outcome, RunHandle,
    Supervisor, SupervisorBuilder, TokioLauncher,
};
