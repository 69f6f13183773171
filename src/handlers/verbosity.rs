//! Verbosity-override handler
//!
//! Wraps an origin handler with two filters:
//!
//! - a global ceiling: records at or above it pass straight through, with no
//!   lock taken;
//! - per-callsite overrides installed with [`VerbosityHandler::vmodule`]:
//!   a record below the ceiling passes if the last rule matching its source
//!   file grants its level.
//!
//! The origin's own level check still applies on top of both.
//!
//! Rule evaluation happens once per callsite. The outcome (matched level, or
//! no match) is cached by [`CallSite`] and reused until the next ruleset is
//! installed.

use crate::core::vmodule::{parse_ruleset, Pattern};
use crate::core::{Attr, CallSite, Handler, Level, Record, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::sync::Arc;

/// Patterns and the cache built against them. Always replaced together.
#[derive(Debug, Clone, Default)]
struct OverrideState {
    patterns: Vec<Pattern>,
    /// `None` records that no pattern matched: the ceiling alone applies.
    site_cache: HashMap<CallSite, Option<Level>>,
}

/// # Example
///
/// ```
/// use vmodule_logger::handlers::{SharedBuffer, TerminalHandler, VerbosityHandler};
/// use vmodule_logger::{Level, Logger};
/// use std::sync::Arc;
///
/// let buffer = SharedBuffer::new();
/// let glog = Arc::new(VerbosityHandler::new(Arc::new(TerminalHandler::new(buffer.clone(), false))));
/// glog.set_verbosity(Level::INFO);
/// glog.vmodule("net/*=5").unwrap();
///
/// let logger = Logger::new(glog.clone());
/// logger.debug("suppressed outside net/", &[]);
/// assert!(buffer.contents().is_empty());
/// ```
pub struct VerbosityHandler {
    origin: Arc<dyn Handler>,
    level: AtomicI32,
    override_enabled: AtomicBool,
    state: RwLock<OverrideState>,
    resolutions: AtomicU64,
}

impl VerbosityHandler {
    /// New handler with ceiling [`Level::INFO`] and no overrides.
    pub fn new(origin: Arc<dyn Handler>) -> Self {
        Self {
            origin,
            level: AtomicI32::new(Level::INFO.value()),
            override_enabled: AtomicBool::new(false),
            state: RwLock::new(OverrideState::default()),
            resolutions: AtomicU64::new(0),
        }
    }

    /// Set the global verbosity ceiling.
    pub fn set_verbosity(&self, level: Level) {
        self.level.store(level.value(), Ordering::Release);
    }

    pub fn verbosity(&self) -> Level {
        Level::new(self.level.load(Ordering::Acquire))
    }

    /// Install a new override ruleset (`pattern=N,...`).
    ///
    /// The whole ruleset is validated before anything changes: on error the
    /// previous patterns and cache stay active. On success the pattern list
    /// is swapped and the cache emptied under one write lock.
    pub fn vmodule(&self, ruleset: &str) -> Result<()> {
        let filter = parse_ruleset(ruleset)?;

        let mut state = self.state.write();
        let enabled = !filter.is_empty();
        state.patterns = filter;
        state.site_cache = HashMap::new();
        self.override_enabled.store(enabled, Ordering::Release);

        Ok(())
    }

    /// Source text of the active rules, in evaluation order.
    pub fn patterns(&self) -> Vec<String> {
        self.state
            .read()
            .patterns
            .iter()
            .map(|p| p.rule().to_string())
            .collect()
    }

    /// Whether any override rules are installed.
    pub fn overrides_enabled(&self) -> bool {
        self.override_enabled.load(Ordering::Acquire)
    }

    /// Number of callsites resolved against the patterns (cache misses).
    pub fn site_resolutions(&self) -> u64 {
        self.resolutions.load(Ordering::Relaxed)
    }

    /// Number of callsites currently cached.
    pub fn cached_sites(&self) -> usize {
        self.state.read().site_cache.len()
    }

    /// Full admission decision for a record at `level` from `site`.
    pub fn admits(&self, level: Level, site: &CallSite) -> bool {
        if level >= self.verbosity() {
            return true;
        }
        if !self.override_enabled.load(Ordering::Acquire) {
            return false;
        }

        let cached = self.state.read().site_cache.get(site).copied();
        let resolved = match cached {
            Some(resolved) => resolved,
            None => self.resolve(site),
        };

        matches!(resolved, Some(granted) if level >= granted)
    }

    /// Evaluate the patterns for `site` and cache the outcome.
    ///
    /// Runs under the write lock so the outcome is always computed against
    /// the pattern list it is cached next to. Another thread may have
    /// resolved the same site between our read and write locks; the cached
    /// entry is then reused.
    fn resolve(&self, site: &CallSite) -> Option<Level> {
        let mut state = self.state.write();
        if let Some(resolved) = state.site_cache.get(site) {
            return *resolved;
        }

        let path = site.match_path();
        // Later rules override earlier ones, so the last match wins.
        let resolved = state
            .patterns
            .iter()
            .rev()
            .find(|pattern| pattern.matches(&path))
            .map(Pattern::level);

        state.site_cache.insert(*site, resolved);
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        resolved
    }
}

impl Handler for VerbosityHandler {
    fn name(&self) -> &str {
        "verbosity"
    }

    fn enabled(&self, level: Level) -> bool {
        (self.override_enabled.load(Ordering::Acquire) || level >= self.verbosity())
            && self.origin.enabled(level)
    }

    fn enabled_at(&self, level: Level, site: &CallSite) -> bool {
        self.admits(level, site) && self.origin.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<()> {
        if self.enabled_at(record.level, &record.callsite) {
            self.origin.handle(record)
        } else {
            Ok(())
        }
    }

    fn flush(&self) -> Result<()> {
        self.origin.flush()
    }

    /// The derived handler starts from the current ceiling, patterns and a
    /// private copy of the cache; later changes on either side stay local.
    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        let snapshot = self.state.read().clone();
        Arc::new(Self {
            origin: self.origin.with_attrs(attrs),
            level: AtomicI32::new(self.level.load(Ordering::Acquire)),
            override_enabled: AtomicBool::new(!snapshot.patterns.is_empty()),
            state: RwLock::new(snapshot),
            resolutions: AtomicU64::new(0),
        })
    }
}
