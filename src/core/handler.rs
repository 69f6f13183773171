//! Handler trait for record sinks

use super::{
    attr::Attr,
    callsite::CallSite,
    error::{LoggerError, Result},
    log_level::Level,
    log_record::Record,
};
use std::sync::Arc;

/// Decides whether records are wanted and renders the ones that are.
///
/// Handlers are shared between loggers, so every method takes `&self`;
/// implementations serialise access to their output internally.
pub trait Handler: Send + Sync {
    fn name(&self) -> &str;

    /// Coarse check made before a record is built.
    fn enabled(&self, level: Level) -> bool;

    /// Check with the emitting callsite known. Handlers that filter per
    /// callsite override this; everyone else falls back to [`Handler::enabled`].
    fn enabled_at(&self, level: Level, _site: &CallSite) -> bool {
        self.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<()>;

    /// Push buffered output to its destination.
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Derive a handler that adds `attrs` to every record it handles.
    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler>;

    /// Attribute groups are not supported by any handler in this crate.
    fn with_group(&self, _name: &str) -> Result<Arc<dyn Handler>> {
        Err(LoggerError::unsupported(self.name(), "with_group"))
    }
}
