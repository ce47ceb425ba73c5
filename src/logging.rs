use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the level filter. `RUST_LOG` wins when set.
fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

/// Setup logging to stderr, plus a daily rotating file when `log_dir` is given.
///
/// # Arguments
/// * `log_dir` - Directory for log files, created if missing; `None` for console only
/// * `log_prefix` - Prefix for log files (e.g., "stowaway")
/// * `verbose` - If true, use debug level; otherwise use info level
///
/// # Returns
/// When file logging is enabled, a guard that must be held for the duration
/// of the program to keep the file writer flushing
pub fn setup_logging(
    log_dir: Option<&Utf8Path>,
    log_prefix: &str,
    verbose: bool,
) -> Result<Option<WorkerGuard>> {
    let Some(log_dir) = log_dir else {
        let console_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(build_filter(verbose))
            .with(console_layer)
            .try_init()
            .context("Failed to install logging subscriber")?;

        tracing::debug!("Logging initialized: console only, verbose={}", verbose);
        return Ok(None);
    };

    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }

    let file_appender = rolling::daily(log_dir, log_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI codes in log files
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    // Also log to stderr with ANSI colors
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install logging subscriber")?;

    tracing::debug!(
        "Logging initialized: dir={}, prefix={}, verbose={}",
        log_dir,
        log_prefix,
        verbose
    );

    Ok(Some(guard))
}
