//! Output format selection and shared key=value escaping
//!
//! - Terminal: human-readable aligned lines
//! - Json: one JSON object per line
//! - Logfmt: key=value lines compatible with log aggregation tools

use super::error::LoggerError;
use super::handler::Handler;
use super::log_level::Level;
use crate::handlers::{JsonHandler, LogfmtHandler, Sink, TerminalHandler};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Example: `[INFO ] [01-08|10:30:45.123] Request processed  id=7`
    #[default]
    Terminal,

    /// Example: `{"t":"2025-01-08T10:30:45.123000000Z","lvl":"info","msg":"Request processed","id":7}`
    Json,

    /// Example: `t=2025-01-08T10:30:45+0000 lvl=info msg="Request processed" id=7`
    Logfmt,
}

impl OutputFormat {
    /// Build the output handler for this format writing to `sink`.
    pub fn handler(&self, sink: Sink, level: Level, use_color: bool) -> Arc<dyn Handler> {
        match self {
            OutputFormat::Terminal => Arc::new(
                TerminalHandler::with_sink(sink, use_color).with_level(level),
            ),
            OutputFormat::Json => Arc::new(JsonHandler::with_sink(sink).with_level(level)),
            OutputFormat::Logfmt => Arc::new(LogfmtHandler::with_sink(sink).with_level(level)),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "terminal" | "text" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            "logfmt" => Ok(OutputFormat::Logfmt),
            other => Err(LoggerError::config(
                "OutputFormat",
                format!("unknown format '{}'", other),
            )),
        }
    }
}

/// Written in place of a key with no printable characters left.
pub(crate) const BAD_KEY: &str = "!BADKEY";

/// Escape a logfmt key (remove spaces and special chars)
pub(crate) fn escape_logfmt_key(key: &str) -> String {
    let escaped: String = key
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect();
    if escaped.is_empty() {
        BAD_KEY.to_string()
    } else {
        escaped
    }
}

/// Escape a logfmt value, quoting it when it is empty or holds anything
/// that could end the field or the line.
pub(crate) fn escape_logfmt_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c == '"' || c == '=' || c.is_whitespace() || c.is_control());
    if needs_quotes {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

/// Quote a logfmt value; the result never contains a raw control character.
pub(crate) fn quote_logfmt_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{{{:04x}}}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Terminal);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("logfmt".parse::<OutputFormat>().unwrap(), OutputFormat::Logfmt);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Terminal);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_serde() {
        let format: OutputFormat = serde_json::from_str("\"logfmt\"").unwrap();
        assert_eq!(format, OutputFormat::Logfmt);
    }

    #[test]
    fn test_handler_names() {
        let sink = crate::handlers::sink(std::io::sink());
        assert_eq!(OutputFormat::Json.handler(sink.clone(), Level::INFO, false).name(), "json");
        assert_eq!(OutputFormat::Logfmt.handler(sink.clone(), Level::INFO, false).name(), "logfmt");
        assert_eq!(OutputFormat::Terminal.handler(sink, Level::INFO, false).name(), "terminal");
    }

    #[test]
    fn test_logfmt_escaping() {
        assert_eq!(escape_logfmt_value("plain"), "plain");
        assert_eq!(escape_logfmt_value("two words"), "\"two words\"");
        assert_eq!(escape_logfmt_value("id=1"), "\"id=1\"");
        assert_eq!(escape_logfmt_value(""), "\"\"");
        assert_eq!(quote_logfmt_value("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(escape_logfmt_key("http target!"), "httptarget");
        assert_eq!(escape_logfmt_key("http.target"), "http.target");
    }

    #[test]
    fn test_logfmt_control_characters_are_quoted() {
        assert_eq!(escape_logfmt_value("bob\nlvl=crit"), "\"bob\\nlvl=crit\"");
        assert_eq!(escape_logfmt_value("a\tb"), "\"a\\tb\"");
        assert_eq!(escape_logfmt_value("a\rb"), "\"a\\rb\"");
        assert_eq!(escape_logfmt_value("bell\u{7}"), "\"bell\\u{0007}\"");
        assert_eq!(escape_logfmt_value("nbsp\u{a0}x"), "\"nbsp\u{a0}x\"");
        assert_eq!(escape_logfmt_value("C:\\dir"), "C:\\dir");
        assert_eq!(quote_logfmt_value("C:\\dir"), "\"C:\\\\dir\"");
    }

    #[test]
    fn test_logfmt_empty_key_placeholder() {
        assert_eq!(escape_logfmt_key("!!"), BAD_KEY);
        assert_eq!(escape_logfmt_key(""), BAD_KEY);
        assert_eq!(escape_logfmt_key("line\nbreak"), "linebreak");
    }
}
