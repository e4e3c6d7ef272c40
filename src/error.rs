//! Error types for cmdwarden
//!
//! Every failure mode of a supervised run is a distinct, inspectable variant
//! so callers can react differently to a timeout versus an external
//! cancellation versus a launch failure.

use std::time::Duration;

use thiserror::Error;

/// Main error type for supervised command runs
#[derive(Error, Debug)]
pub enum RunError {
    /// Invalid setup, detected before any process is spawned
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The OS failed to create the process (executable not found,
    /// permission denied, ...)
    #[error("Failed to launch command: {command}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command did not finish within the configured timeout
    #[error("Command did not finish within {timeout:?} (elapsed {elapsed:?}): {command}")]
    Timeout {
        command: String,
        timeout: Duration,
        elapsed: Duration,
    },

    /// An external cancel signal requested abort before completion
    #[error("Run cancelled while executing command: {command}")]
    Cancelled { command: String },

    /// The worker waiting for process exit failed unexpectedly
    #[error("Command execution failed: {command}: {message}")]
    Execution { command: String, message: String },
}

impl RunError {
    /// Shorthand for a `Configuration` error
    pub fn configuration(message: impl Into<String>) -> Self {
        RunError::Configuration {
            message: message.into(),
        }
    }

    /// True for `Timeout` and `Cancelled`, the two abort outcomes
    pub fn is_abort(&self) -> bool {
        matches!(self, RunError::Timeout { .. } | RunError::Cancelled { .. })
    }
}
