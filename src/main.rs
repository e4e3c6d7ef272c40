//! cmdwarden CLI entry point
//!
//! Usage:
//!   cmdwarden run [flags] -- <command...>    Run a command under supervision
//!   cmdwarden check [flags] -- <command...>  Validate without running

use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cmdwarden::cli::{CheckArgs, Cli, Commands, OutputFormat, RunArgs};
use cmdwarden::config::{load_config, Config};
use cmdwarden::status;
use cmdwarden::supervisor::{CancelFlag, ExitCodeMapper, Supervisor, TokioLauncher};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Initialise the tracing subscriber once at startup
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects debug level.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "cmdwarden=debug"
        } else {
            "cmdwarden=warn"
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Run(args) => run_command(args, cli.config.as_deref()).await,
        Commands::Check(args) => {
            check_command(args, cli.config.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Build the exit-code-to-label mapper from configuration
///
/// Falls back to the conventional zero/non-zero mapping when no
/// `[exit_codes.map]` entries are configured.
fn build_label_mapper(config: &Config) -> Result<ExitCodeMapper<String>> {
    let table = config.exit_codes.table()?;
    if table.is_empty() {
        let simple = status::simple();
        Ok(Box::new(move |code| simple(code).to_string()))
    } else {
        Ok(status::from_table(table, config.exit_codes.fallback.clone()))
    }
}

/// Run one command under supervision
async fn run_command(args: RunArgs, config_path: Option<&str>) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let command_line = args.command_line();

    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.defaults.timeout());
    let poll_interval = args
        .poll_interval
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.defaults.poll_interval());
    let interrupt = args.interrupt_on_cancel || config.defaults.interrupt_on_cancel;

    let label = build_label_mapper(&config)?;

    let mut builder = Supervisor::builder(&command_line)
        .timeout(timeout)
        .poll_interval(poll_interval)
        .interrupt_on_cancel(interrupt)
        .mapper(move |code| (code, label(code)))
        .launcher(TokioLauncher::new());

    if let Some(ref dir) = args.cwd {
        builder = builder.working_dir(dir.clone());
    }
    if !args.env.is_empty() {
        builder = builder.env(args.env.clone());
    }

    let supervisor = builder.build()?;

    // Ctrl-C surfaces as an external cancellation of the run.
    let cancel = CancelFlag::new();
    {
        let flag = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                flag.trigger();
            }
        });
    }

    let started = Instant::now();
    let (code, status) = supervisor.run(&cancel).await?;
    let elapsed = started.elapsed();

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "command": command_line,
                "status": status,
                "exit_code": code,
                "elapsed_ms": elapsed.as_millis() as u64,
            }))?;
            println!("{}", json);
        }
        OutputFormat::Plain => {
            println!("{}", status);
        }
        OutputFormat::Table => {
            let colored_status = if code == 0 {
                status.green()
            } else {
                status.red()
            };
            println!("{}: {}", "status".cyan(), colored_status);
            println!("{}: {}", "exit code".cyan(), code);
            println!("{}: {}ms", "elapsed".cyan(), elapsed.as_millis());
        }
    }

    // Propagate the child's exit code. Negative codes (signal-terminated
    // children) have no direct representation; they exit 1 rather than
    // wrapping around to success.
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

/// Validate a run configuration without spawning a process
fn check_command(args: CheckArgs, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let command_line = args.command_line();

    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.defaults.timeout());

    let label = build_label_mapper(&config)?;

    let mut builder = Supervisor::builder(&command_line)
        .timeout(timeout)
        .mapper(move |code| label(code))
        .launcher(TokioLauncher::new());

    if let Some(ref dir) = args.cwd {
        builder = builder.working_dir(dir.clone());
    }

    builder.validate()?;

    println!("{}: {}", "ok".green(), command_line);
    Ok(())
}
