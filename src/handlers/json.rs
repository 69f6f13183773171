//! JSON handler for structured logging

use super::sink::{sink, Sink};
use crate::core::{Attr, Handler, Level, Record, Result, TimestampFormat};
use std::io::Write;
use std::sync::Arc;

/// Keys written by the handler itself.
const RECORD_KEYS: [&str; 3] = ["t", "lvl", "msg"];

/// Attributes that collide with [`RECORD_KEYS`] are written under this prefix.
const FIELD_PREFIX: &str = "fields.";

/// Writes each record as a single-line JSON object (JSONL format)
///
/// Keys appear in order: `t`, `lvl`, `msg`, then attributes as given.
/// An attribute named `t`, `lvl` or `msg` is written as `fields.<key>`.
/// Compatible with log aggregation tools like ELK, Loki, etc.
pub struct JsonHandler {
    sink: Sink,
    level: Level,
    timestamp_format: TimestampFormat,
    attrs: Vec<Attr>,
}

impl JsonHandler {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::with_sink(sink(writer))
    }

    pub fn with_sink(sink: Sink) -> Self {
        Self {
            sink,
            level: Level::MAX_VERBOSITY,
            timestamp_format: TimestampFormat::Rfc3339Nanos,
            attrs: Vec::new(),
        }
    }

    /// Only emit records at or above `level`
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn render(&self, record: &Record) -> Result<String> {
        let mut obj = serde_json::Map::new();
        obj.insert(
            "t".to_string(),
            serde_json::Value::String(self.timestamp_format.format(&record.time)),
        );
        obj.insert(
            "lvl".to_string(),
            serde_json::Value::String(record.level.as_str().to_string()),
        );
        obj.insert(
            "msg".to_string(),
            serde_json::Value::String(record.message.clone()),
        );
        for attr in self.attrs.iter().chain(record.attrs.iter()) {
            let key = if RECORD_KEYS.contains(&attr.key.as_str()) {
                format!("{}{}", FIELD_PREFIX, attr.key)
            } else {
                attr.key.clone()
            };
            obj.insert(key, attr.value.to_json_value());
        }

        Ok(serde_json::to_string(&serde_json::Value::Object(obj))?)
    }
}

impl Handler for JsonHandler {
    fn name(&self) -> &str {
        "json"
    }

    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let line = self.render(record)?;
        let mut writer = self.sink.lock();
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.sink.lock().flush()?;
        Ok(())
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        let mut merged = self.attrs.clone();
        merged.extend_from_slice(attrs);
        Arc::new(Self {
            sink: Arc::clone(&self.sink),
            level: self.level,
            timestamp_format: self.timestamp_format.clone(),
            attrs: merged,
        })
    }
}
