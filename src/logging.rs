use anyhow::{anyhow, Result};
use std::path::Path;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{fmt::writer::MakeWriterExt, EnvFilter};

/// Log file prefix inside `<data dir>/logs`
const LOG_PREFIX: &str = "minoxtrack";

/// Log to a daily-rolling file, plus stderr when `show_stderr` is set.
/// The TUI owns stdout, so nothing is ever written there.
pub fn enable_logging(logs_dir: &Path, show_stderr: bool) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(logs_dir)?;

    let stderr = std::io::stderr.with_filter(move |_| show_stderr);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info",
            env!("CARGO_PKG_NAME").replace('-', "_")
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(stderr.and(appender))
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))?;
    Ok(())
}
