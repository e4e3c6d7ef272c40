//! CLI module for cmdwarden
//!
//! Provides the command-line interface:
//! - `run` - Supervise one external command
//! - `check` - Validate a run configuration without spawning anything

pub mod commands;

pub use commands::{CheckArgs, Cli, Commands, OutputFormat, RunArgs};
