//! Tracing setup.
//!
//! The terminal belongs to the meditation screen, so logs go to a daily
//! rolling file. Commands that do not take over the terminal may also log
//! warnings to stderr.

use std::path::Path;

use cosmos_core::config::LoggingConfig;
use cosmos_core::{CosmosError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of the rolling log.
pub const LOG_FILE_PREFIX: &str = "cosmos.log";

/// Where log output goes besides the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLogging {
    /// The terminal is in use by a full-screen view.
    Off,
    /// Warnings and errors on stderr.
    Warnings,
}

/// Builds the file filter: `RUST_LOG` wins over the configured directive.
pub fn file_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            CosmosError::config(format!("invalid logging.filter '{}': {}", config.filter, e))
        }),
    }
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer when dropped and must be held
/// for the life of the process.
pub fn init_logging(
    config: &LoggingConfig,
    default_dir: &Path,
    console: ConsoleLogging,
) -> Result<WorkerGuard> {
    let directory = config.directory.as_deref().unwrap_or(default_dir);
    std::fs::create_dir_all(directory)?;

    let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(file_writer)
        .with_filter(file_filter(config)?);

    let console_layer = match console {
        ConsoleLogging::Off => None,
        ConsoleLogging::Warnings => Some(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new("warn")),
        ),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| CosmosError::internal(format!("Failed to install logging: {}", e)))?;

    tracing::info!("[Logging] Writing logs to {}", directory.display());
    Ok(guard)
}
