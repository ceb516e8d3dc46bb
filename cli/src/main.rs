//! CLI entrypoint for promptlog
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod exit_codes;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use promptlog_application::{ChatSession, LogLoadError, LogOrigin, LogStore};
use promptlog_infrastructure::{ConfigLoader, HttpCompletionGateway, JsonFileStorage};
use promptlog_presentation::{ChatRepl, Cli, EditorInput, InteractiveRepairPrompt, ThinkingSpinner};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return ExitCode::from(exit_codes::OK);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return ExitCode::from(exit_codes::STARTUP_FAILED);
        }
    };

    let result = runtime.block_on(run(cli));

    // A prompt read cut short by Ctrl-C is still blocked on stdin
    runtime.shutdown_background();

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::STARTUP_FAILED)
        }
    }
}

async fn run(cli: Cli) -> Result<u8> {
    info!("Starting promptlog");

    // === Configuration ===
    let loaded = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    };
    let mut config = loaded.map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if let Some(path) = cli.log_file {
        config.log.file = path;
    }

    let settings = config.completion_settings()?;

    // === Interaction log ===
    let storage = JsonFileStorage::new(config.log.file.clone());
    let log = match LogStore::load(storage, &InteractiveRepairPrompt::new()).await {
        Ok(log) => log,
        Err(e) => return Ok(report_load_failure(&e)),
    };

    if log.origin() == LogOrigin::Repaired {
        println!("🧹 Logs cleared successfully!");
    }

    // === Dependency Injection ===
    let gateway = Arc::new(
        HttpCompletionGateway::new(settings).context("Failed to build HTTP client")?,
    );

    let mut repl = ChatRepl::new(ChatSession::new(gateway, log));
    if !cli.quiet && config.repl.show_progress {
        repl = repl.with_progress(Box::new(ThinkingSpinner::new()));
    }

    let input = EditorInput::new().context("Failed to initialize line editor")?;
    let end = repl.run(Box::new(input)).await?;
    info!("Exiting after {:?}", end);

    Ok(exit_codes::OK)
}

/// Print the user-facing message for a fatal log problem and pick the exit code.
fn report_load_failure(error: &LogLoadError) -> u8 {
    match error {
        LogLoadError::RepairDeclined { .. } => {
            println!("🚪 Exiting without clearing logs file...");
            exit_codes::STARTUP_FAILED
        }
        LogLoadError::RepairFailed { .. } => {
            eprintln!("🚫 Error clearing logs, aborting... ({})", error);
            exit_codes::REPAIR_FAILED
        }
        LogLoadError::Read { .. } | LogLoadError::Create { .. } => {
            eprintln!("Error: {}", error);
            exit_codes::STARTUP_FAILED
        }
    }
}
