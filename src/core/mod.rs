//! Core logger types and traits

pub mod attr;
pub mod callsite;
pub mod config;
pub mod error;
pub mod handler;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod root;
pub mod sampling;
pub mod timestamp;
pub mod vmodule;

pub use attr::{attrs_from_pairs, Attr, FieldValue, ERROR_KEY};
pub use callsite::CallSite;
pub use config::LogConfig;
pub use error::{LoggerError, Result};
pub use handler::Handler;
pub use log_level::Level;
pub use log_record::Record;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use sampling::{EndpointExcluder, SamplerMetrics, SamplingDecision, TracingConfig};
pub use timestamp::TimestampFormat;
pub use vmodule::Pattern;
