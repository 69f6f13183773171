//! Timestamp formatting utilities
//!
//! Each output handler renders the record time with one of these formats.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Terse time used by the terminal handler: `10-16|14:03:07.512`
const TERMINAL_FORMAT: &str = "%m-%d|%H:%M:%S%.3f";

/// Time used for the `t` attribute of logfmt output: `2026-10-16T14:03:07+0000`
const LOGFMT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use vmodule_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Logfmt;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with("+0000"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with nanoseconds: `2026-10-16T14:03:07.512034000Z`
    #[default]
    Rfc3339Nanos,

    /// Month-day and time with milliseconds: `10-16|14:03:07.512`
    Terminal,

    /// Second precision with numeric offset: `2026-10-16T14:03:07+0000`
    Logfmt,

    /// Custom strftime format
    ///
    /// ```
    /// use vmodule_logger::core::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    ///
    /// A `Custom` format chrono cannot render falls back to RFC 3339.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Rfc3339Nanos => datetime.to_rfc3339_opts(SecondsFormat::Nanos, true),
            TimestampFormat::Terminal => datetime.format(TERMINAL_FORMAT).to_string(),
            TimestampFormat::Logfmt => datetime.format(LOGFMT_FORMAT).to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => datetime.to_rfc3339_opts(SecondsFormat::Nanos, true),
                }
            }
        }
    }

    /// Reject a `Custom` format containing specifiers chrono does not know.
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(format_str) = self {
            if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "TimestampFormat",
                    format!("invalid strftime format '{}'", format_str),
                ));
            }
        }
        Ok(())
    }
}
