//! Logging macros for ergonomic key/value logging.
//!
//! The macros record the invocation site as the callsite and check it
//! against the logger before any attribute is converted, so a suppressed
//! call costs no allocation.
//!
//! # Examples
//!
//! ```
//! use vmodule_logger::prelude::*;
//! use vmodule_logger::handlers::DiscardHandler;
//! use std::sync::Arc;
//!
//! let logger = Logger::new(Arc::new(DiscardHandler::new()));
//!
//! // Message only
//! info!(logger, "Server started");
//!
//! // With key/value context
//! let port = 8080;
//! info!(logger, "listening", "port" => port, "tls" => false);
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use vmodule_logger::prelude::*;
/// # use vmodule_logger::handlers::DiscardHandler;
/// # let logger = Logger::new(std::sync::Arc::new(DiscardHandler::new()));
/// use vmodule_logger::log;
/// log!(logger, Level::INFO, "Simple message");
/// log!(logger, Level::ERROR, "request failed", "status" => 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {{
        let __site = $crate::CallSite::new(file!(), line!(), column!());
        let __level: $crate::Level = $level;
        let __logger = &$logger;
        if __logger.enabled_at(__level, &__site) {
            __logger.write_enabled(
                __level,
                __site,
                $msg,
                &[$($crate::FieldValue::from($key), $crate::FieldValue::from($value)),*],
            );
        }
    }};
}

/// Log a trace-level message.
///
/// ```
/// # use vmodule_logger::prelude::*;
/// # use vmodule_logger::handlers::DiscardHandler;
/// # let logger = Logger::new(std::sync::Arc::new(DiscardHandler::new()));
/// trace!(logger, "entering", "fn" => "calculate");
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::TRACE, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::WARN, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($arg)+)
    };
}

/// Log a critical message and exit the process with status 1.
///
/// Expands to an expression of type `!`; nothing after it runs.
///
/// ```no_run
/// # use vmodule_logger::prelude::*;
/// # use vmodule_logger::handlers::DiscardHandler;
/// # let logger = Logger::new(std::sync::Arc::new(DiscardHandler::new()));
/// crit!(logger, "database unreachable", "attempts" => 5);
/// ```
#[macro_export]
macro_rules! crit {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.crit_at(
            $crate::CallSite::new(file!(), line!(), column!()),
            $msg,
            &[$($crate::FieldValue::from($key), $crate::FieldValue::from($value)),*],
        )
    };
}

/// Build a context slice from alternating keys and values.
///
/// ```
/// use vmodule_logger::{kv, FieldValue};
///
/// let ctx = kv!["user", "alice", "attempts", 3];
/// assert_eq!(ctx.len(), 4);
/// assert!(matches!(ctx[3], FieldValue::Int(3)));
/// ```
#[macro_export]
macro_rules! kv {
    ($($item:expr),* $(,)?) => {
        [$($crate::FieldValue::from($item)),*]
    };
}
