//! # vmodule_logger
//!
//! Leveled, structured logging with per-callsite verbosity overrides that
//! can be changed while the program runs.
//!
//! ## Features
//!
//! - **Cheap suppression**: a record below the global ceiling costs one
//!   atomic load and is never built
//! - **Per-callsite overrides**: `net/*=5,peer.rs=4` style rules raise the
//!   verbosity of chosen source files without touching the rest
//! - **Structured output**: terminal, JSON and logfmt handlers
//! - **Thread safe**: loggers are cheap to clone and share across threads
//!
//! ```
//! use vmodule_logger::handlers::{sink, SharedBuffer};
//! use vmodule_logger::prelude::*;
//!
//! let buffer = SharedBuffer::new();
//! let config = LogConfig { format: OutputFormat::Logfmt, ..LogConfig::default() };
//! let (logger, verbosity) = config.build(sink(buffer.clone())).unwrap();
//!
//! info!(logger, "listening", "port" => 30303);
//! debug!(logger, "not shown");
//!
//! verbosity.set_verbosity(Level::DEBUG);
//! debug!(logger, "shown");
//!
//! assert_eq!(buffer.lines().len(), 2);
//! ```

pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        Attr, CallSite, FieldValue, Handler, Level, LogConfig, Logger, LoggerBuilder, LoggerError,
        LoggerMetrics, OutputFormat, Result, TimestampFormat,
    };
    pub use crate::handlers::VerbosityHandler;
    pub use crate::{crit, debug, error, info, kv, log, trace, warn};
}

pub use crate::core::root::{crit, debug, error, info, new, root, set_default, trace, warn};
pub use crate::core::{
    attrs_from_pairs, Attr, CallSite, EndpointExcluder, FieldValue, Handler, Level, LogConfig,
    Logger, LoggerBuilder, LoggerError, LoggerMetrics, OutputFormat, Pattern, Record, Result,
    SamplerMetrics, SamplingDecision, TimestampFormat, TracingConfig, ERROR_KEY,
};
pub use crate::handlers::VerbosityHandler;
