//! Process-wide default logger
//!
//! Starts out discarding everything until [`set_default`] installs a real
//! logger. The reference is swapped atomically; every call sees one complete
//! logger, never a partially replaced one.

use super::attr::FieldValue;
use super::callsite::CallSite;
use super::log_level::Level;
use super::logger::Logger;
use crate::handlers::DiscardHandler;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

static ROOT: LazyLock<ArcSwap<Logger>> =
    LazyLock::new(|| ArcSwap::from_pointee(Logger::new(Arc::new(DiscardHandler::new()))));

/// Snapshot of the current default logger.
pub fn root() -> Arc<Logger> {
    ROOT.load_full()
}

/// Replace the default logger used by the free functions.
pub fn set_default(logger: Logger) {
    ROOT.store(Arc::new(logger));
}

/// Derive a logger from the default one with extra context.
pub fn new(ctx: &[FieldValue]) -> Logger {
    ROOT.load().with(ctx)
}

#[track_caller]
pub fn trace(msg: &str, ctx: &[FieldValue]) {
    ROOT.load().write_at(Level::TRACE, CallSite::caller(), msg, ctx);
}

#[track_caller]
pub fn debug(msg: &str, ctx: &[FieldValue]) {
    ROOT.load().write_at(Level::DEBUG, CallSite::caller(), msg, ctx);
}

#[track_caller]
pub fn info(msg: &str, ctx: &[FieldValue]) {
    ROOT.load().write_at(Level::INFO, CallSite::caller(), msg, ctx);
}

#[track_caller]
pub fn warn(msg: &str, ctx: &[FieldValue]) {
    ROOT.load().write_at(Level::WARN, CallSite::caller(), msg, ctx);
}

#[track_caller]
pub fn error(msg: &str, ctx: &[FieldValue]) {
    ROOT.load().write_at(Level::ERROR, CallSite::caller(), msg, ctx);
}

/// Emit a critical record through the default logger, then exit the
/// process with status 1. **Never returns.**
#[track_caller]
pub fn crit(msg: &str, ctx: &[FieldValue]) -> ! {
    let logger = root();
    logger.crit_at(CallSite::caller(), msg, ctx)
}
