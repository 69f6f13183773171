//! Serde-loadable logger configuration
//!
//! ```
//! use vmodule_logger::handlers::{sink, SharedBuffer};
//! use vmodule_logger::{Level, LogConfig};
//!
//! let config = LogConfig::from_json_str(
//!     r#"{"verbosity": 2, "vmodule": "p2p/*=5", "format": "logfmt"}"#,
//! )
//! .unwrap();
//!
//! let buffer = SharedBuffer::new();
//! let (logger, verbosity) = config.build(sink(buffer.clone())).unwrap();
//! assert_eq!(verbosity.verbosity(), Level::WARN);
//! assert_eq!(verbosity.patterns(), vec!["p2p/*".to_string()]);
//!
//! logger.warn("kept", &[]);
//! assert!(buffer.contents().contains("lvl=warn msg=kept"));
//! ```

use super::error::Result;
use super::log_level::Level;
use super::logger::Logger;
use super::output_format::OutputFormat;
use super::root::set_default;
use crate::handlers::{Sink, VerbosityHandler};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Legacy verbosity used when none is configured (info).
pub const DEFAULT_VERBOSITY: i32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Global ceiling as a legacy integer, 0 = crit ... 5 = trace
    pub verbosity: i32,

    /// Per-callsite overrides, `pattern=N,...`
    pub vmodule: String,

    pub format: OutputFormat,

    /// Colour level names (terminal format with the `console` feature only)
    pub color: bool,

    /// Legacy-integer floor applied by the output handler itself, under
    /// any per-callsite override
    pub level_floor: Option<i32>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            verbosity: DEFAULT_VERBOSITY,
            vmodule: String::new(),
            format: OutputFormat::default(),
            color: false,
            level_floor: None,
        }
    }
}

impl LogConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Build a logger writing to `sink`.
    ///
    /// Fails if the override ruleset is malformed.
    pub fn build(&self, sink: Sink) -> Result<(Logger, Arc<VerbosityHandler>)> {
        let floor = self
            .level_floor
            .map(Level::from_legacy)
            .unwrap_or(Level::MAX_VERBOSITY);
        let output = self.format.handler(sink, floor, self.color);

        Logger::builder()
            .verbosity(Level::from_legacy(self.verbosity))
            .vmodule(self.vmodule.as_str())
            .handler(output)
            .build()
    }

    /// Build a logger writing to `sink` and make it the default logger.
    pub fn install(&self, sink: Sink) -> Result<Arc<VerbosityHandler>> {
        let (logger, verbosity) = self.build(sink)?;
        set_default(logger);
        Ok(verbosity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;
    use crate::handlers::{sink, SharedBuffer};
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.verbosity, 3);
        assert!(config.vmodule.is_empty());
        assert_eq!(config.format, OutputFormat::Terminal);

        let (_, verbosity) = config.build(sink(std::io::sink())).unwrap();
        assert_eq!(verbosity.verbosity(), Level::INFO);
        assert!(!verbosity.overrides_enabled());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LogConfig::from_json_str(r#"{"format": "json"}"#).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.verbosity, DEFAULT_VERBOSITY);
    }

    #[test]
    fn test_malformed_json() {
        let err = LogConfig::from_json_str("{verbosity: 3").unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_bad_ruleset_fails_build() {
        let config = LogConfig {
            vmodule: "ok.rs=5,=3".to_string(),
            ..LogConfig::default()
        };
        let err = config.build(sink(std::io::sink())).err().unwrap();
        assert!(matches!(err, LoggerError::VmoduleSyntax { .. }));
    }

    #[test]
    fn test_level_floor_applies_under_overrides() {
        let buffer = SharedBuffer::new();
        let config = LogConfig {
            verbosity: 3,
            vmodule: "config.rs=5".to_string(),
            format: OutputFormat::Logfmt,
            level_floor: Some(4),
            ..LogConfig::default()
        };
        let (logger, _) = config.build(sink(buffer.clone())).unwrap();

        logger.debug("admitted", &[]);
        logger.trace("below floor", &[]);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("msg=admitted"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"verbosity": 5, "color": true}}"#).unwrap();

        let config = LogConfig::from_file(file.path()).unwrap();
        assert_eq!(config.verbosity, 5);
        assert!(config.color);

        let err = LogConfig::from_file("/nonexistent/log.json").unwrap_err();
        assert!(matches!(err, LoggerError::IoError(_)));
    }
}
