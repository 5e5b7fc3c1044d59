//! Tracing subscriber setup shared by services

use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::{Config, LogFormat};

/// Install the global tracing subscriber described by `config`.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.rust_log)
        .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG '{}': {}", config.rust_log, e))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.log_format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::debug!(format = %config.log_format, "Tracing initialized");
    Ok(())
}

/// Fresh identifier used to correlate the log lines of one request
pub fn request_id() -> String {
    Uuid::new_v4().to_string()
}
