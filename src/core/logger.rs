//! Main logger implementation

use super::{
    attr::{attrs_from_pairs, FieldValue},
    callsite::CallSite,
    error::Result,
    handler::Handler,
    log_level::Level,
    log_record::Record,
    metrics::LoggerMetrics,
};
use crate::handlers::{TerminalHandler, VerbosityHandler};
use std::fmt;
use std::sync::Arc;

/// Leveled logger writing key/value records to a [`Handler`]
///
/// Cloning is cheap: clones and loggers derived with [`Logger::with`] share
/// the handler's output and the same [`LoggerMetrics`].
///
/// Context is passed as an alternating key/value slice. The [`kv!`] macro
/// builds one from mixed value types:
///
/// ```
/// use vmodule_logger::handlers::{JsonHandler, SharedBuffer};
/// use vmodule_logger::{kv, Logger};
/// use std::sync::Arc;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::new(Arc::new(JsonHandler::new(buffer.clone())));
///
/// logger.info("peer connected", &kv!["id", "4f2a", "inbound", true]);
/// assert!(buffer.contents().contains("\"inbound\":true"));
/// ```
///
/// [`kv!`]: crate::kv
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Create a builder for a logger behind a [`VerbosityHandler`]
    ///
    /// # Example
    /// ```
    /// use vmodule_logger::{Level, Logger};
    ///
    /// let (logger, verbosity) = Logger::builder()
    ///     .verbosity(Level::DEBUG)
    ///     .vmodule("net/*=5")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(verbosity.verbosity(), Level::DEBUG);
    /// assert!(logger.enabled(Level::TRACE));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Derive a logger that adds `ctx` to every record.
    ///
    /// The receiver is left untouched.
    pub fn with(&self, ctx: &[FieldValue]) -> Logger {
        let attrs = attrs_from_pairs(ctx);
        Logger {
            handler: self.handler.with_attrs(&attrs),
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Fails with [`LoggerError::Unsupported`] for every handler in this crate.
    ///
    /// [`LoggerError::Unsupported`]: super::error::LoggerError::Unsupported
    pub fn with_group(&self, name: &str) -> Result<Logger> {
        Ok(Logger {
            handler: self.handler.with_group(name)?,
            metrics: Arc::clone(&self.metrics),
        })
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Whether any record at `level` could be emitted.
    ///
    /// While per-callsite overrides are active this answers `true` for levels
    /// below the ceiling; [`Logger::enabled_at`] gives the exact answer.
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    #[inline]
    pub fn enabled_at(&self, level: Level, site: &CallSite) -> bool {
        self.handler.enabled_at(level, site)
    }

    /// Emit a record attributed to the caller's source location.
    #[track_caller]
    #[inline]
    pub fn write(&self, level: Level, msg: &str, ctx: &[FieldValue]) {
        self.write_at(level, CallSite::caller(), msg, ctx);
    }

    /// Alias for [`Logger::write`]
    #[track_caller]
    #[inline]
    pub fn log(&self, level: Level, msg: &str, ctx: &[FieldValue]) {
        self.write_at(level, CallSite::caller(), msg, ctx);
    }

    /// Emit a record attributed to `site`.
    ///
    /// Nothing is allocated when the level is not enabled at `site`.
    pub fn write_at(&self, level: Level, site: CallSite, msg: &str, ctx: &[FieldValue]) {
        if !self.handler.enabled_at(level, &site) {
            return;
        }
        self.write_enabled(level, site, msg, ctx);
    }

    /// Emit a record the caller has already checked with
    /// [`Logger::enabled_at`]. The logging macros expand to this.
    #[doc(hidden)]
    pub fn write_enabled(&self, level: Level, site: CallSite, msg: &str, ctx: &[FieldValue]) {
        let record = Record::new(level, msg, site).with_attrs(attrs_from_pairs(ctx));
        self.emit(&record);
    }

    fn emit(&self, record: &Record) {
        self.metrics.record_emitted();
        if let Err(e) = self.handler.handle(record) {
            self.metrics.record_write_failure();
            eprintln!(
                "[LOGGER ERROR] Handler '{}' failed at {}: {}",
                self.handler.name(),
                record.callsite,
                e
            );
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.handler.flush()
    }

    #[track_caller]
    #[inline]
    pub fn trace(&self, msg: &str, ctx: &[FieldValue]) {
        self.write_at(Level::TRACE, CallSite::caller(), msg, ctx);
    }

    #[track_caller]
    #[inline]
    pub fn debug(&self, msg: &str, ctx: &[FieldValue]) {
        self.write_at(Level::DEBUG, CallSite::caller(), msg, ctx);
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, msg: &str, ctx: &[FieldValue]) {
        self.write_at(Level::INFO, CallSite::caller(), msg, ctx);
    }

    #[track_caller]
    #[inline]
    pub fn warn(&self, msg: &str, ctx: &[FieldValue]) {
        self.write_at(Level::WARN, CallSite::caller(), msg, ctx);
    }

    #[track_caller]
    #[inline]
    pub fn error(&self, msg: &str, ctx: &[FieldValue]) {
        self.write_at(Level::ERROR, CallSite::caller(), msg, ctx);
    }

    /// Emit a critical record, then terminate the process.
    ///
    /// **This never returns.** After the record is written and the handler
    /// flushed, the process exits with status 1. Destructors of live values
    /// do not run.
    #[track_caller]
    pub fn crit(&self, msg: &str, ctx: &[FieldValue]) -> ! {
        self.crit_at(CallSite::caller(), msg, ctx)
    }

    /// [`Logger::crit`] with an explicit callsite. **Never returns.**
    pub fn crit_at(&self, site: CallSite, msg: &str, ctx: &[FieldValue]) -> ! {
        self.write_at(Level::CRIT, site, msg, ctx);
        if let Err(e) = self.handler.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush before exit: {}", e);
        }
        std::process::exit(1)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("handler", &self.handler.name())
            .field("metrics", &self.metrics)
            .finish()
    }
}

/// Builder for a [`Logger`] whose records pass through a [`VerbosityHandler`]
///
/// # Example
/// ```
/// use vmodule_logger::handlers::{LogfmtHandler, SharedBuffer};
/// use vmodule_logger::{Level, Logger};
/// use std::sync::Arc;
///
/// let buffer = SharedBuffer::new();
/// let (logger, verbosity) = Logger::builder()
///     .verbosity(Level::WARN)
///     .handler(Arc::new(LogfmtHandler::new(buffer.clone())))
///     .build()
///     .unwrap();
///
/// logger.info("hidden", &[]);
/// verbosity.set_verbosity(Level::INFO);
/// logger.info("shown", &[]);
///
/// assert_eq!(buffer.lines().len(), 1);
/// ```
pub struct LoggerBuilder {
    verbosity: Level,
    vmodule: Option<String>,
    handler: Option<Arc<dyn Handler>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            verbosity: Level::INFO,
            vmodule: None,
            handler: None,
        }
    }

    /// Set the global verbosity ceiling
    #[must_use = "builder methods return a new value"]
    pub fn verbosity(mut self, level: Level) -> Self {
        self.verbosity = level;
        self
    }

    /// Set the per-callsite override ruleset, validated by `build`
    #[must_use = "builder methods return a new value"]
    pub fn vmodule(mut self, ruleset: impl Into<String>) -> Self {
        self.vmodule = Some(ruleset.into());
        self
    }

    /// Set the output handler
    ///
    /// If not called, records go to stderr through an uncoloured
    /// [`TerminalHandler`].
    #[must_use = "builder methods return a new value"]
    pub fn handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Build the logger, returning the verbosity handler for reconfiguration.
    pub fn build(self) -> Result<(Logger, Arc<VerbosityHandler>)> {
        let origin: Arc<dyn Handler> = match self.handler {
            Some(handler) => handler,
            None => Arc::new(TerminalHandler::new(std::io::stderr(), false)),
        };

        let verbosity = Arc::new(VerbosityHandler::new(origin));
        verbosity.set_verbosity(self.verbosity);
        if let Some(ruleset) = self.vmodule {
            verbosity.vmodule(&ruleset)?;
        }

        let logger = Logger::new(verbosity.clone());
        Ok((logger, verbosity))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
