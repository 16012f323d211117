//! lcgen binary
//!
//! ```bash
//! # Generate Rust modules for every localizable interface of a manifest
//! lcgen generate i18n.toml -p resources --out src/i18n
//!
//! # Inspect resolved values as JSON
//! lcgen resolve i18n.toml --interface org.demo.Labels
//!
//! # Evaluate one constant
//! lcgen lookup i18n.toml Labels fr string title
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use lc_cli::{
    cli::CliConfig,
    commands::{self, generate::GenerateArgs, lookup::LookupArgs, resolve::ResolveArgs},
    diagnostics::{render_cli_error, setup_error_reporting},
    CliError, Result,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "lcgen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generates per-locale implementations of localizable constants interfaces"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, global = true, value_enum)]
    log: Option<LogLevel>,

    /// Set log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust modules for every localizable interface
    Generate(GenerateArgs),

    /// Print effective methods, resolved values and lookup tables as JSON
    Resolve(ResolveArgs),

    /// Evaluate one constant of one locale
    Lookup(LookupArgs),
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli) {
        if !render_cli_error(&e) {
            tracing::error!("{}", e);
        }
        if verbose > 0 {
            tracing::error!(?e, "detailed error context");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    setup_error_reporting()?;
    setup_logging(cli.verbose, cli.quiet, cli.log, cli.log_format)?;

    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir).map_err(CliError::Io)?;
    }

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => {
            let report = commands::generate_command(args, &config)?;
            info!(
                "generated {} interface(s), {} file(s) written",
                report.processed, report.emitted
            );
        }
        Commands::Resolve(args) => {
            let resolved = commands::resolve_command(args, &config)?;
            print_json(&resolved)?;
        }
        Commands::Lookup(args) => {
            let value = commands::lookup_command(args, &config)?;
            print_json(&value)?;
        }
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn setup_logging(
    verbose: u8,
    quiet: bool,
    log_level: Option<LogLevel>,
    log_format: LogFormat,
) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if let Some(level) = log_level {
        EnvFilter::new(match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let formatter = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_level(true);

    match log_format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(formatter)
                .with(filter)
                .try_init()
                .map_err(|e| CliError::Config(format!("Failed to setup logging: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(formatter.json())
                .with(filter)
                .try_init()
                .map_err(|e| CliError::Config(format!("Failed to setup logging: {}", e)))?;
        }
    }

    Ok(())
}
