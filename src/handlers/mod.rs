//! Handler implementations

pub mod discard;
pub mod json;
pub mod logfmt;
pub mod sink;
pub mod terminal;
pub mod verbosity;

pub use discard::DiscardHandler;
pub use json::JsonHandler;
pub use logfmt::LogfmtHandler;
pub use sink::{sink, SharedBuffer, Sink};
pub use terminal::TerminalHandler;
pub use verbosity::VerbosityHandler;

pub use crate::core::Handler;
