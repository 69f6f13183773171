//! Structured attributes attached to records
//!
//! Callers pass attributes as an alternating key/value sequence of
//! [`FieldValue`]s (see the `kv!` macro). [`attrs_from_pairs`] turns such a
//! sequence into [`Attr`]s, repairing odd-length input instead of rejecting it.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::sync::Arc;

/// Key of the diagnostic attribute appended to odd-length attribute lists.
pub const ERROR_KEY: &str = "LOG_ERROR";

const ODD_ARITY_MESSAGE: &str = "Normalized odd number of arguments by adding nil";

/// Value type for structured logging fields
#[derive(Clone)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Time(DateTime<Utc>),
    /// Arbitrary-precision number in canonical decimal form; `None` is a null reference.
    Big(Option<String>),
    /// Any `Display` value rendered lazily; `None` is a null reference.
    Stringer(Option<Arc<dyn fmt::Display + Send + Sync>>),
    Null,
}

impl FieldValue {
    /// Wrap a value that is rendered through its `Display` impl.
    pub fn stringer<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        FieldValue::Stringer(Some(Arc::new(value)))
    }

    /// Like [`FieldValue::stringer`], with `None` rendering as `<nil>`.
    pub fn stringer_opt<T>(value: Option<T>) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        FieldValue::Stringer(value.map(|v| Arc::new(v) as Arc<dyn fmt::Display + Send + Sync>))
    }

    /// Arbitrary-precision number, `None` rendering as `<nil>`.
    pub fn big<T: fmt::Display>(value: Option<T>) -> Self {
        FieldValue::Big(value.map(|v| v.to_string()))
    }

    pub fn is_null(&self) -> bool {
        matches!(
            self,
            FieldValue::Null | FieldValue::Big(None) | FieldValue::Stringer(None)
        )
    }

    /// Convert to serde_json::Value for JSON serialization
    ///
    /// Big numbers and stringers become strings so no precision is lost.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Time(t) => {
                serde_json::Value::String(t.to_rfc3339_opts(SecondsFormat::Nanos, true))
            }
            FieldValue::Null => serde_json::Value::Null,
            other => serde_json::Value::String(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            FieldValue::Big(Some(digits)) => f.write_str(digits),
            FieldValue::Stringer(Some(value)) => write!(f, "{}", value),
            FieldValue::Big(None) | FieldValue::Stringer(None) | FieldValue::Null => {
                f.write_str("<nil>")
            }
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.debug_tuple("String").field(s).finish(),
            FieldValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            FieldValue::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            FieldValue::Float(fl) => f.debug_tuple("Float").field(fl).finish(),
            FieldValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            FieldValue::Time(t) => f.debug_tuple("Time").field(t).finish(),
            FieldValue::Big(b) => f.debug_tuple("Big").field(b).finish(),
            FieldValue::Stringer(s) => f
                .debug_tuple("Stringer")
                .field(&s.as_ref().map(|v| v.to_string()))
                .finish(),
            FieldValue::Null => f.write_str("Null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::Uint(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<i128> for FieldValue {
    fn from(i: i128) -> Self {
        FieldValue::Big(Some(i.to_string()))
    }
}

impl From<u128> for FieldValue {
    fn from(u: u128) -> Self {
        FieldValue::Big(Some(u.to_string()))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Time(t)
    }
}

impl From<std::time::Duration> for FieldValue {
    fn from(d: std::time::Duration) -> Self {
        FieldValue::String(format!("{:?}", d))
    }
}

/// A single key/value attribute
#[derive(Debug, Clone)]
pub struct Attr {
    pub key: String,
    pub value: FieldValue,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Pair up an alternating key/value sequence.
///
/// An odd-length sequence is not an error: a `Null` value completes the last
/// pair and a [`ERROR_KEY`] attribute records the repair.
pub fn attrs_from_pairs(ctx: &[FieldValue]) -> Vec<Attr> {
    let mut attrs = Vec::with_capacity(ctx.len() / 2 + 1);
    for pair in ctx.chunks(2) {
        let key = match &pair[0] {
            FieldValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        let value = pair.get(1).cloned().unwrap_or(FieldValue::Null);
        attrs.push(Attr { key, value });
    }

    if ctx.len() % 2 != 0 {
        attrs.push(Attr::new(ERROR_KEY, ODD_ARITY_MESSAGE));
    }

    attrs
}
