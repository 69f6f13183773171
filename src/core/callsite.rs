//! Callsite identity for emitted records
//!
//! A [`CallSite`] names the source location that emitted a record. It is
//! captured through `#[track_caller]`, so every public entry point that is
//! itself `#[track_caller]` resolves to the user's code no matter how many
//! wrapper layers sit in between.

use std::fmt;
use std::panic::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    file: &'static str,
    line: u32,
    column: u32,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }

    /// Capture the location of the outermost `#[track_caller]` frame.
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Location::caller().into()
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// Source path with `/` separators and a leading `/`, the form override
    /// patterns are compiled against.
    pub fn match_path(&self) -> String {
        let normalized = self.file.replace('\\', "/");
        if normalized.starts_with('/') {
            normalized
        } else {
            format!("/{}", normalized)
        }
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
