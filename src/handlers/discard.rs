//! Handler that drops everything

use crate::core::{Attr, Handler, Level, Record, Result};
use std::sync::Arc;

/// Inert handler installed before any real handler exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardHandler;

impl DiscardHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Handler for DiscardHandler {
    fn name(&self) -> &str {
        "discard"
    }

    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn handle(&self, _record: &Record) -> Result<()> {
        Ok(())
    }

    fn with_attrs(&self, _attrs: &[Attr]) -> Arc<dyn Handler> {
        Arc::new(DiscardHandler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallSite, LoggerError};

    #[test]
    fn test_discard_is_never_enabled() {
        let handler = DiscardHandler::new();
        assert!(!handler.enabled(Level::CRIT));
        assert!(!handler.enabled(Level::TRACE));
    }

    #[test]
    fn test_discard_accepts_records() {
        let handler = DiscardHandler::new();
        let record = Record::new(Level::ERROR, "dropped", CallSite::new("src/a.rs", 1, 1));
        assert!(handler.handle(&record).is_ok());
        assert_eq!(handler.with_attrs(&[Attr::new("k", 1)]).name(), "discard");
    }

    #[test]
    fn test_discard_with_group_unsupported() {
        let err = DiscardHandler::new().with_group("g").err().unwrap();
        assert!(matches!(err, LoggerError::Unsupported { .. }));
    }
}
