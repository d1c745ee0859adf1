//! Diagnostic logging for the `tl` binary.
//!
//! The library only talks to the `log` facade. The binary installs a
//! `flexi_logger` backend writing to stderr, once per process. The level
//! comes from `RUST_LOG` when set, otherwise from the requested default.

use std::sync::OnceLock;

use flexi_logger::{Logger, LoggerHandle};

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

/// Error type for logger setup
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error|off")]
    UnsupportedLevel(String),
    #[error("failed to start logger: {0}")]
    Start(#[from] flexi_logger::FlexiLoggerError),
}

/// Start stderr logging. Calling this again after a successful start is a
/// no-op.
pub fn init_logging(default_level: &str) -> Result<(), LoggingError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let level = normalize_level(default_level)?;
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()?;
    // A racing initializer already won; its handle stays in place
    let _ = LOGGER.set(handle);
    log::debug!("logging started at default level {}", level);
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        _ => Err(LoggingError::UnsupportedLevel(level.to_string())),
    }
}
