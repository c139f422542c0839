use crate::error::{AppError, Result};
use chrono::Local;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directory the log files go to: `<config dir>/pocket/logs`
pub fn logs_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or(AppError::MissingDirectory("config"))?;
    Ok(config_dir.join("pocket").join("logs"))
}

/// Initialize tracing with file-based logging
///
/// Logs are written to `<config dir>/pocket/logs/pocket-YYYY-MM-DD-HH-MM-SS.log`;
/// the terminal belongs to the UI. The returned guard flushes the writer when dropped.
pub fn init_logging() -> Result<(PathBuf, WorkerGuard)> {
    let logs_dir = logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_filename = format!("pocket-{}.log", timestamp);
    let log_path = logs_dir.join(&log_filename);

    let file_appender = tracing_appender::rolling::never(&logs_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI codes in log file
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // Default to INFO, can be overridden with RUST_LOG
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Ok((log_path, guard))
}
