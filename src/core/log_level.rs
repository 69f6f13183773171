//! Log level definitions
//!
//! Levels are signed integers so that the named levels can sit on a wider
//! scale than the legacy `0..=5` verbosity integers. A more severe level
//! compares greater: `CRIT > ERROR > WARN > INFO > DEBUG > TRACE`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const LEGACY_CRIT: i32 = 0;
const LEGACY_ERROR: i32 = 1;
const LEGACY_WARN: i32 = 2;
const LEGACY_INFO: i32 = 3;
const LEGACY_DEBUG: i32 = 4;
const LEGACY_TRACE: i32 = 5;

/// Severity level; the default is [`Level::INFO`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(i32);

impl Level {
    /// Lower than every named level; a ceiling at this value admits everything.
    pub const MAX_VERBOSITY: Level = Level(i32::MIN);
    pub const TRACE: Level = Level(-8);
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);
    pub const CRIT: Level = Level(12);

    pub const fn new(value: i32) -> Self {
        Level(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Convert a legacy verbosity integer (0 = crit ... 5 = trace).
    ///
    /// Values above the legacy trace value clamp to [`Level::TRACE`], anything
    /// else unrecognised (negative values) clamps to [`Level::CRIT`].
    pub fn from_legacy(lvl: i32) -> Self {
        match lvl {
            LEGACY_CRIT => Level::CRIT,
            LEGACY_ERROR => Level::ERROR,
            LEGACY_WARN => Level::WARN,
            LEGACY_INFO => Level::INFO,
            LEGACY_DEBUG => Level::DEBUG,
            LEGACY_TRACE => Level::TRACE,
            l if l > LEGACY_TRACE => Level::TRACE,
            _ => Level::CRIT,
        }
    }

    /// Lowercase name, `"unknown"` for levels off the named scale.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
            Level::CRIT => "crit",
            _ => "unknown",
        }
    }

    /// Five-character uppercase name used by the terminal handler.
    pub fn aligned_str(&self) -> &'static str {
        match *self {
            Level::TRACE => "TRACE",
            Level::DEBUG => "DEBUG",
            Level::INFO => "INFO ",
            Level::WARN => "WARN ",
            Level::ERROR => "ERROR",
            Level::CRIT => "CRIT ",
            _ => "unknown level",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match *self {
            Level::TRACE => BrightBlack,
            Level::DEBUG => Blue,
            Level::INFO => Green,
            Level::WARN => Yellow,
            Level::ERROR => Red,
            Level::CRIT => BrightRed,
            _ => White,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    /// Accepts level names (case-insensitive) or legacy verbosity integers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" | "warning" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            "crit" | "critical" => Ok(Level::CRIT),
            other => other
                .parse::<i32>()
                .map(Level::from_legacy)
                .map_err(|_| format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_mapping() {
        assert_eq!(Level::from_legacy(0), Level::CRIT);
        assert_eq!(Level::from_legacy(1), Level::ERROR);
        assert_eq!(Level::from_legacy(2), Level::WARN);
        assert_eq!(Level::from_legacy(3), Level::INFO);
        assert_eq!(Level::from_legacy(4), Level::DEBUG);
        assert_eq!(Level::from_legacy(5), Level::TRACE);
    }

    #[test]
    fn test_legacy_clamping() {
        assert_eq!(Level::from_legacy(6), Level::TRACE);
        assert_eq!(Level::from_legacy(i32::MAX), Level::TRACE);
        assert_eq!(Level::from_legacy(-1), Level::CRIT);
        assert_eq!(Level::from_legacy(i32::MIN), Level::CRIT);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Level::CRIT > Level::ERROR);
        assert!(Level::ERROR > Level::WARN);
        assert!(Level::WARN > Level::INFO);
        assert!(Level::INFO > Level::DEBUG);
        assert!(Level::DEBUG > Level::TRACE);
        assert!(Level::TRACE > Level::MAX_VERBOSITY);
    }

    #[test]
    fn test_names() {
        assert_eq!(Level::WARN.as_str(), "warn");
        assert_eq!(Level::CRIT.to_string(), "crit");
        assert_eq!(Level::INFO.aligned_str(), "INFO ");
        assert_eq!(Level::DEBUG.aligned_str(), "DEBUG");

        for level in [
            Level::TRACE,
            Level::DEBUG,
            Level::INFO,
            Level::WARN,
            Level::ERROR,
            Level::CRIT,
        ] {
            assert_eq!(level.aligned_str().len(), 5);
        }
    }

    #[test]
    fn test_unknown_level_names() {
        let odd = Level::new(3);
        assert_eq!(odd.as_str(), "unknown");
        assert_eq!(odd.aligned_str(), "unknown level");
        assert_eq!(Level::MAX_VERBOSITY.as_str(), "unknown");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("INFO".parse::<Level>(), Ok(Level::INFO));
        assert_eq!("Warning".parse::<Level>(), Ok(Level::WARN));
        assert_eq!(" crit ".parse::<Level>(), Ok(Level::CRIT));
        assert_eq!("5".parse::<Level>(), Ok(Level::TRACE));
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Level::WARN).unwrap();
        assert_eq!(json, "4");
        let back: Level = serde_json::from_str("-8").unwrap();
        assert_eq!(back, Level::TRACE);
    }
}
