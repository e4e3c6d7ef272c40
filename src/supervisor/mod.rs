//! Supervised command execution
//!
//! Drives one asynchronous invocation of an external command to completion
//! under two competing deadlines (wall-clock timeout, external cancel
//! signal), polling at a configurable interval:
//!
//! - [`CommandSpec`] - validated, immutable run configuration
//! - [`Supervisor`] - owns the poll loop and the exit-code mapper
//! - [`Launcher`] / [`TokioLauncher`] - process launch strategy
//! - [`CancelSignal`] / [`CancelFlag`] - externally supplied abort predicate

pub mod launch;
pub mod runner;
pub mod signal;
pub mod spec;

pub use launch::{Launcher, RunHandle, TokioLauncher};
pub use runner::{ExitCodeMapper, Outcome, Supervisor, SupervisorBuilder};
pub use signal::{CancelFlag, CancelSignal};
pub use spec::CommandSpec;
