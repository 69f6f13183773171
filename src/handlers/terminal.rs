//! Human-readable terminal handler
//!
//! ```text
//! [LEVEL] [TIME] MESSAGE key=value key=value ...
//! [INFO ] [10-16|14:03:07.512] peer connected                           id=4f2a  addr=10.0.0.7:30303
//! ```

use super::sink::{sink, Sink};
use crate::core::output_format::{escape_logfmt_key, escape_logfmt_value};
use crate::core::{Attr, Handler, Level, Record, Result, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

/// Messages followed by attributes are left-justified to this many columns.
const MESSAGE_JUSTIFY: usize = 40;

/// Values longer than this do not widen their key's column.
const MAX_FIELD_PADDING: usize = 40;

pub struct TerminalHandler {
    sink: Sink,
    level: Level,
    use_color: bool,
    timestamp_format: TimestampFormat,
    attrs: Vec<Attr>,
    /// Widest value seen so far per key; entries only grow.
    field_padding: Mutex<HashMap<String, usize>>,
}

impl TerminalHandler {
    pub fn new<W: Write + Send + 'static>(writer: W, use_color: bool) -> Self {
        Self::with_sink(sink(writer), use_color)
    }

    pub fn with_sink(sink: Sink, use_color: bool) -> Self {
        Self {
            sink,
            level: Level::MAX_VERBOSITY,
            use_color,
            timestamp_format: TimestampFormat::Terminal,
            attrs: Vec::new(),
            field_padding: Mutex::new(HashMap::new()),
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

    /// Current column width for `key`, 0 if it has not been written yet.
    pub fn field_padding(&self, key: &str) -> usize {
        self.field_padding.lock().get(key).copied().unwrap_or(0)
    }

    /// Forget all column widths.
    pub fn reset_field_padding(&self) {
        self.field_padding.lock().clear();
    }

    fn level_label(&self, level: Level) -> String {
        #[cfg(feature = "console")]
        if self.use_color {
            return level.aligned_str().color(level.color_code()).to_string();
        }
        level.aligned_str().to_string()
    }

    fn render(&self, record: &Record, padding: &mut HashMap<String, usize>) -> String {
        let mut line = String::with_capacity(128);
        line.push('[');
        line.push_str(&self.level_label(record.level));
        line.push_str("] [");
        line.push_str(&self.timestamp_format.format(&record.time));
        line.push_str("] ");
        line.push_str(&record.message);

        let attrs: Vec<&Attr> = self.attrs.iter().chain(record.attrs.iter()).collect();
        if !attrs.is_empty() {
            let len = record.message.chars().count();
            if len < MESSAGE_JUSTIFY {
                line.push_str(&" ".repeat(MESSAGE_JUSTIFY - len));
            }
        }

        let last = attrs.len().saturating_sub(1);
        for (i, attr) in attrs.iter().enumerate() {
            let key = escape_logfmt_key(&attr.key);
            let value = escape_logfmt_value(&attr.value.to_string());
            let length = value.chars().count();

            let width = padding.entry(key.clone()).or_insert(0);
            if *width < length && length <= MAX_FIELD_PADDING {
                *width = length;
            }
            let width = *width;

            line.push(' ');
            line.push_str(&key);
            line.push('=');
            line.push_str(&value);
            if i < last && length < width {
                line.push_str(&" ".repeat(width - length));
            }
        }

        line.push('\n');
        line
    }
}

impl Handler for TerminalHandler {
    fn name(&self) -> &str {
        "terminal"
    }

    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &Record) -> Result<()> {
        // Padding stays locked through the write so concurrent lines keep
        // the order their widths were computed in.
        let mut padding = self.field_padding.lock();
        let line = self.render(record, &mut padding);
        let mut writer = self.sink.lock();
        writer.write_all(line.as_bytes())?;
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
            use_color: self.use_color,
            timestamp_format: self.timestamp_format.clone(),
            attrs: merged,
            field_padding: Mutex::new(HashMap::new()),
        })
    }
}
