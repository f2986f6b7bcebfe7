//! # swb CLI entry point
//!
//! Parses command-line arguments, initialises tracing and dispatches to the
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use swb_cli::{run_smoke, run_validate, CliConfig, RunArgs, ValidateArgs};

/// Solver workbench: validate solver configurations and smoke-test them.
#[derive(Parser, Debug)]
#[command(name = "swb", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to configuration file. Defaults to ./swb.yaml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate solver configuration resources without running them.
    Validate(ValidateArgs),

    /// Validate, then smoke-test resources of allow-listed projects.
    Run(RunArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let result = CliConfig::load(cli.config.as_deref())
        .and_then(|config| config.validator())
        .and_then(|validator| match &cli.command {
            Commands::Validate(args) => run_validate(args, &validator),
            Commands::Run(args) => run_smoke(args, &validator),
        });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
