//! Binary entry point for the queuegen CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Generate atomic queues from a source directory
//! queuegen target/generated-sources/atomic src/main/java/org/jctools/queues
//!
//! # Pick files explicitly and get a JSON report
//! queuegen --json out BaseLinkedQueue.java MpscLinkedQueue.java
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use queuegen::cli::{run, BatchFailure};
use queuegen_core::config::GeneratorConfig;
use queuegen_core::error::OutputErrorCode;
use queuegen_core::output::{emit_response, ErrorResponse, FileResult, GenerateResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Derive atomic field-updater linked queues from their unsafe-offset sources.
#[derive(Parser, Debug)]
#[command(name = "queuegen", version, about = "Generate atomic linked queue sources")]
struct Cli {
    /// Directory the generated sources are written to (created if missing).
    output_dir: PathBuf,

    /// Source files, or directories searched for `.java` files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// TOML file overriding the generator settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level for tracing output.
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Print a JSON report instead of text; log lines on stderr become JSON too.
    #[arg(long)]
    json: bool,
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

// ============================================================================
// Main
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level, cli.json);

    let outcome = GeneratorConfig::load_or_default(cli.config.as_deref())
        .map_err(BatchFailure::from)
        .and_then(|config| run(&cli.output_dir, &cli.inputs, &config));

    match outcome {
        Ok(files) => {
            report_success(files, cli.json);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            let error_code = OutputErrorCode::from(&failure.error);
            report_failure(failure, cli.json);
            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber, emitting JSON lines when `json` is set.
fn init_tracing(level: LogLevel, json: bool) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ============================================================================
// Reporting
// ============================================================================

fn report_success(files: Vec<FileResult>, json: bool) {
    let mut stdout = io::stdout();
    if json {
        let _ = emit_response(&GenerateResponse::new(files), &mut stdout);
    } else {
        for file in &files {
            let _ = writeln!(stdout, "written {}", file.output);
        }
    }
    let _ = stdout.flush();
}

fn report_failure(failure: BatchFailure, json: bool) {
    if json {
        let written = failure.written.into_iter().map(|f| f.output).collect();
        let response = ErrorResponse::from_error(&failure.error, written);
        let mut stdout = io::stdout();
        let _ = emit_response(&response, &mut stdout);
        let _ = stdout.flush();
    } else {
        for file in &failure.written {
            println!("written {}", file.output);
        }
        eprintln!("error: {}", failure.error);
    }
}
