//! Configuration module for cmdwarden
//!
//! Provides XDG-compliant layered configuration loading for run defaults
//! (timeout, poll interval, interrupt-on-cancel) and the exit-code table.

pub mod loader;
pub mod model;

pub use loader::{config_paths, load_config};
pub use model::{Config, Defaults, ExitCodes};
