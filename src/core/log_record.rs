//! Log record structure

use super::attr::Attr;
use super::callsite::CallSite;
use super::log_level::Level;
use chrono::{DateTime, Utc};

/// One emission, built per call and handed to a handler by reference.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
    pub callsite: CallSite,
}

impl Record {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Level, message: &str, callsite: CallSite) -> Self {
        Self {
            time: Utc::now(),
            level,
            message: Self::sanitize_message(message),
            attrs: Vec::new(),
            callsite,
        }
    }

    pub fn with_attrs(mut self, attrs: Vec<Attr>) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sanitizes_message() {
        let record = Record::new(
            Level::INFO,
            "login\nERROR forged line\tx",
            CallSite::new("src/auth.rs", 3, 1),
        );
        assert_eq!(record.message, "login\\nERROR forged line\\tx");
        assert!(!record.message.contains('\n'));
    }

    #[test]
    fn test_record_carries_callsite() {
        let site = CallSite::new("src/db/pool.rs", 42, 9);
        let record = Record::new(Level::DEBUG, "acquired", site)
            .with_attrs(vec![Attr::new("conn", 3)]);

        assert_eq!(record.callsite, site);
        assert_eq!(record.level, Level::DEBUG);
        assert_eq!(record.attrs.len(), 1);
    }
}
