//! Shared utilities, configuration, and error handling for Kitbag services
//!
//! This crate provides the pieces every service in the family needs:
//! - Configuration loaded from the environment
//! - A common error type that renders as an HTTP response
//! - Tracing subscriber setup
//! - Map, string and timestamp helpers
//! - Docker registry credential payloads

pub mod config;
pub mod docker;
pub mod error;
pub mod maps;
pub mod strings;
pub mod telemetry;
pub mod time;

pub use config::{Config, LogFormat};
pub use error::{Error, Result};
pub use time::{Clock, FakeClock, SystemClock};
