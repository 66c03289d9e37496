use crate::{Error, Result};
use tracing_subscriber::{filter::LevelFilter, fmt::MakeWriter, EnvFilter};

/// Validates that a log level string is valid
pub fn validate_log_level(level: &str) -> Result<()> {
    level.parse::<LevelFilter>().map_err(|_| {
        Error::config(format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        ))
    })?;
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
pub fn resolve_log_level(configured: &str) -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| configured.to_string())
}

/// Installs the JSON tracing subscriber for a service binary, logging to stdout.
pub fn init(log_level: &str) -> Result<()> {
    install(log_level, std::io::stdout)
}

/// Same as [`init`] but logs to stderr, leaving stdout to the command's report.
pub fn init_stderr(log_level: &str) -> Result<()> {
    install(log_level, std::io::stderr)
}

/// Filter built from exactly `log_level`; the environment is not consulted.
pub fn level_filter(log_level: &str) -> Result<EnvFilter> {
    validate_log_level(log_level)?;
    EnvFilter::try_new(log_level).map_err(|e| Error::config(format!("Invalid log filter: {}", e)))
}

fn install<W>(log_level: &str, writer: W) -> Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(level_filter(log_level)?)
        .with_writer(writer)
        .json()
        .try_init()
        .map_err(|e| Error::config(format!("Failed to install tracing subscriber: {}", e)))
}
