//! Binary entry point for the rxt CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Print the JSON AST of a pattern
//! rxt parse '/a(b|c)+/g'
//!
//! # Regenerate a bare body with flags
//! rxt generate 'a(?:b)' --flags i
//!
//! # Run passes (configured defaults when no --pass is given)
//! rxt transform '/(?:a)[bb]x/' --pass ungroup --pass dedupe-class
//! rxt transform '/a.b.c/' --pass strip-chars --strip abc
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use rxtree::cli::{run_generate, run_parse, run_transform};
use rxtree::config::Config;
use rxtree::error::{OutputErrorCode, RxError};
use rxtree::output::{emit_response, emit_response_compact, ErrorResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Regular expression AST tool.
///
/// Parses, regenerates and transforms patterns. All output is JSON.
#[derive(Parser, Debug)]
#[command(name = "rxt", version, about = "Regular expression AST tool")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Config file (default: .rxtree/config.toml in the current directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Write log lines as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    /// Emit single-line JSON responses.
    #[arg(long, global = true)]
    compact: bool,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a pattern and print its AST.
    Parse {
        /// Pattern literal (`/body/flags`) or bare body.
        #[arg(allow_hyphen_values = true)]
        pattern: String,
        /// Flags; makes `pattern` a bare body.
        #[arg(long)]
        flags: Option<String>,
    },
    /// Parse a pattern and regenerate its text.
    Generate {
        /// Pattern literal (`/body/flags`) or bare body.
        #[arg(allow_hyphen_values = true)]
        pattern: String,
        /// Flags; makes `pattern` a bare body.
        #[arg(long)]
        flags: Option<String>,
    },
    /// Run rewrite passes over a pattern.
    Transform {
        /// Pattern literal (`/body/flags`) or bare body.
        #[arg(allow_hyphen_values = true)]
        pattern: String,
        /// Flags; makes `pattern` a bare body.
        #[arg(long)]
        flags: Option<String>,
        /// Pass to run, in order. Repeatable.
        #[arg(long = "pass", value_name = "NAME")]
        passes: Vec<String>,
        /// Characters removed by the strip-chars pass.
        #[arg(long)]
        strip: Option<String>,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level, cli.global.log_json);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error_code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON, like successful responses.
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();

            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel, json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the explicit config file, or the project config when none is given.
fn load_config(global: &GlobalArgs) -> Result<Config, RxError> {
    match &global.config {
        Some(path) => Config::load(path),
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| RxError::internal(format!("failed to get current directory: {}", e)))?;
            Config::load_from_project(&cwd)
        }
    }
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<(), RxError> {
    let config = load_config(&cli.global)?;
    let settings = &config.rxtree;
    let compact = cli.global.compact || settings.compact;

    let response = match cli.command {
        Command::Parse { pattern, flags } => {
            to_value(run_parse(&pattern, flags.as_deref(), settings)?)?
        }
        Command::Generate { pattern, flags } => {
            to_value(run_generate(&pattern, flags.as_deref(), settings)?)?
        }
        Command::Transform {
            pattern,
            flags,
            passes,
            strip,
        } => to_value(run_transform(
            &pattern,
            flags.as_deref(),
            &passes,
            strip.as_deref(),
            settings,
        )?)?,
    };

    let mut stdout = io::stdout();
    let written = if compact {
        emit_response_compact(&response, &mut stdout)
    } else {
        emit_response(&response, &mut stdout)
    };
    written.map_err(|e| RxError::internal(e.to_string()))?;
    let _ = stdout.flush();
    Ok(())
}

fn to_value<T: serde::Serialize>(response: T) -> Result<Value, RxError> {
    serde_json::to_value(response).map_err(|e| RxError::internal(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
