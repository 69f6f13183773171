//! Logfmt handler: `t=... lvl=... msg=... key=value ...`

use super::sink::{sink, Sink};
use crate::core::output_format::{escape_logfmt_key, escape_logfmt_value};
use crate::core::{Attr, FieldValue, Handler, Level, Record, Result, TimestampFormat};
use std::io::Write;
use std::sync::Arc;

pub struct LogfmtHandler {
    sink: Sink,
    level: Level,
    timestamp_format: TimestampFormat,
    attrs: Vec<Attr>,
}

impl LogfmtHandler {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::with_sink(sink(writer))
    }

    pub fn with_sink(sink: Sink) -> Self {
        Self {
            sink,
            level: Level::MAX_VERBOSITY,
            timestamp_format: TimestampFormat::Logfmt,
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

    fn format_value(&self, value: &FieldValue) -> String {
        match value {
            FieldValue::Time(t) => escape_logfmt_value(&self.timestamp_format.format(t)),
            other => escape_logfmt_value(&other.to_string()),
        }
    }

    fn render(&self, record: &Record) -> String {
        let mut parts = Vec::with_capacity(3 + self.attrs.len() + record.attrs.len());
        parts.push(format!(
            "t={}",
            escape_logfmt_value(&self.timestamp_format.format(&record.time))
        ));
        parts.push(format!("lvl={}", record.level.as_str()));
        parts.push(format!("msg={}", escape_logfmt_value(&record.message)));

        for attr in self.attrs.iter().chain(record.attrs.iter()) {
            parts.push(format!(
                "{}={}",
                escape_logfmt_key(&attr.key),
                self.format_value(&attr.value)
            ));
        }

        parts.join(" ")
    }
}

impl Handler for LogfmtHandler {
    fn name(&self) -> &str {
        "logfmt"
    }

    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let line = self.render(record);
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
