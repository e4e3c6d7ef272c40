//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Supervised command runner.
///
/// Runs an external command under a hard timeout and an external cancel
/// signal (Ctrl-C), polling at a bounded interval, and maps the exit code
/// to an application-level status.
#[derive(Parser, Debug)]
#[command(name = "cmdwarden")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a command under supervision
    Run(RunArgs),

    /// Validate a run configuration without spawning a process
    Check(CheckArgs),
}

/// Arguments for the `run` subcommand
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Command to execute (executable followed by arguments)
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// Timeout in seconds (overrides config)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Interval between termination checks, in milliseconds (overrides config)
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Working directory for the spawned process
    #[arg(short = 'd', long)]
    pub cwd: Option<PathBuf>,

    /// Environment variables in KEY=VALUE format; when given, they replace
    /// the entire inherited environment
    #[arg(short, long = "env", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,

    /// Interrupt the waiting worker when the run is aborted
    #[arg(long)]
    pub interrupt_on_cancel: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl RunArgs {
    /// Join the trailing arguments back into a single command line
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// Arguments for the `check` subcommand
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Command that would be executed
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// Timeout in seconds (overrides config)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Working directory for the spawned process
    #[arg(short = 'd', long)]
    pub cwd: Option<PathBuf>,
}

impl CheckArgs {
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Table,
    /// JSON output
    Json,
    /// Status label only
    Plain,
}

/// Parse KEY=VALUE argument
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid argument '{}': expected KEY=VALUE format", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
