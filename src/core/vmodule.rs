//! Parsing and compilation of per-callsite verbosity rules
//!
//! A ruleset is a comma-separated list of `pattern=N` rules where `N` is a
//! legacy verbosity integer (0 = crit ... 5 = trace). Pattern forms:
//!
//! - `peer.rs=5` matches every source file named `peer.rs`
//! - `net=4` matches files directly inside any directory whose path ends in `net`
//! - `net/*=4` matches files anywhere beneath any `net` directory
//!
//! Patterns are compiled to anchored regular expressions once, when the
//! ruleset is installed, and matched against [`CallSite::match_path`].
//!
//! [`CallSite::match_path`]: super::callsite::CallSite::match_path

use super::error::{LoggerError, Result};
use super::log_level::Level;
use regex::Regex;

/// Extension that marks a pattern as naming one source file.
pub const SOURCE_SUFFIX: &str = ".rs";

/// A compiled rule: source path matcher plus the level it grants.
#[derive(Debug, Clone)]
pub struct Pattern {
    rule: String,
    matcher: Regex,
    level: Level,
}

impl Pattern {
    pub fn compile(pattern: &str, level: Level) -> Result<Self> {
        let mut expr = String::from(".*");
        for comp in pattern.split('/') {
            if comp == "*" {
                expr.push_str("(/.*)?");
            } else if !comp.is_empty() {
                expr.push('/');
                expr.push_str(&regex::escape(comp));
            }
        }
        if !pattern.ends_with(SOURCE_SUFFIX) {
            expr.push_str("/[^/]+");
            expr.push_str(&regex::escape(SOURCE_SUFFIX));
        }
        expr.push('$');

        let matcher = Regex::new(&expr).map_err(|_| LoggerError::vmodule_syntax(pattern))?;
        Ok(Self {
            rule: pattern.to_string(),
            matcher,
            level,
        })
    }

    /// `path` is expected in [`CallSite::match_path`] form.
    ///
    /// [`CallSite::match_path`]: super::callsite::CallSite::match_path
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }
}

/// Parse and compile a whole ruleset, in order.
///
/// The first malformed rule fails the entire ruleset. Rules granting
/// [`Level::CRIT`] are dropped since they cannot admit anything extra.
pub fn parse_ruleset(ruleset: &str) -> Result<Vec<Pattern>> {
    let mut filter = Vec::new();

    for rule in ruleset.split(',') {
        let rule = rule.trim();
        // Empty entries such as from a trailing comma are ignored
        if rule.is_empty() {
            continue;
        }

        let parts: Vec<&str> = rule.split('=').collect();
        if parts.len() != 2 {
            return Err(LoggerError::vmodule_syntax(rule));
        }
        let (pattern, verbosity) = (parts[0].trim(), parts[1].trim());
        if pattern.is_empty() || verbosity.is_empty() {
            return Err(LoggerError::vmodule_syntax(rule));
        }

        let legacy: i32 = verbosity
            .parse()
            .map_err(|_| LoggerError::vmodule_syntax(rule))?;
        let level = Level::from_legacy(legacy);
        if level == Level::CRIT {
            continue;
        }

        filter.push(Pattern::compile(pattern, level)?);
    }

    Ok(filter)
}
