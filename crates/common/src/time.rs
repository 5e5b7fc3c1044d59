//! Timestamp helpers and an injectable clock

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Error, Result};

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Validation(format!("invalid timestamp '{}': {}", timestamp, e)))
}

/// Like [`parse_timestamp`], but `None` when the input does not parse
pub fn parse_timestamp_opt(timestamp: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(timestamp).ok()
}

/// RFC 3339 with whole seconds and a `Z` suffix, e.g. `2024-02-27T10:00:00Z`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Empty string when there is no timestamp
pub fn format_timestamp_opt(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp.map(format_timestamp).unwrap_or_default()
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[mutants::skip] // Reads the system time; nothing to assert on
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a fixed instant, for tests
#[derive(Debug, Clone, Copy)]
pub struct FakeClock {
    now: DateTime<Utc>,
}

impl FakeClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
