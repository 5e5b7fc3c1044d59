//! Service configuration
//!
//! Read from `RUST_LOG`, `LOG_FORMAT` and `CORS_ALLOW_ORIGIN`, with a `.env`
//! file in the working directory taken into account.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{env, fmt, str::FromStr};

use crate::Error;

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(Error::Config(format!(
                "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tracing filter directives
    pub rust_log: String,

    /// Tracing output format
    pub log_format: LogFormat,

    /// Value of the `Access-Control-Allow-Origin` response header
    pub allow_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rust_log: "info".to_string(),
            log_format: LogFormat::Pretty,
            allow_origin: "*".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            rust_log: env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            log_format: match env::var("LOG_FORMAT") {
                Ok(value) => value.parse()?,
                Err(_) => defaults.log_format,
            },
            allow_origin: env::var("CORS_ALLOW_ORIGIN").unwrap_or(defaults.allow_origin),
        };

        if config.allow_origin.trim().is_empty() {
            anyhow::bail!("CORS_ALLOW_ORIGIN must not be empty");
        }

        Ok(config)
    }
}
