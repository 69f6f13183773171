//! Trace sampling with endpoint exclusion
//!
//! [`EndpointExcluder`] drops every span whose `http.target` attribute names
//! an excluded route (health checks, metrics scrapes) and samples the rest
//! with a fixed probability.
//!
//! # Example
//!
//! ```
//! use vmodule_logger::{Attr, EndpointExcluder, SamplingDecision};
//!
//! let sampler = EndpointExcluder::new(["/healthz".to_string()], 1.0);
//!
//! let health = [Attr::new("http.target", "/healthz")];
//! assert_eq!(sampler.should_sample(&health), SamplingDecision::Drop);
//!
//! let api = [Attr::new("http.target", "/v1/blocks")];
//! assert_eq!(sampler.should_sample(&api), SamplingDecision::RecordAndSample);
//! ```

use super::attr::{Attr, FieldValue};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Attribute key carrying the request target.
pub const TARGET_KEY: &str = "http.target";

/// Outcome of a sampling decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingDecision {
    Drop,
    RecordAndSample,
}

impl SamplingDecision {
    pub fn is_sampled(self) -> bool {
        self == SamplingDecision::RecordAndSample
    }
}

/// Metrics for sampling observability
///
/// # Example
///
/// ```
/// use vmodule_logger::SamplerMetrics;
///
/// let metrics = SamplerMetrics::new();
/// assert_eq!(metrics.sampled_count(), 0);
/// assert_eq!(metrics.excluded_count(), 0);
/// ```
#[derive(Debug)]
pub struct SamplerMetrics {
    /// Decisions that admitted the span
    sampled_count: AtomicU64,

    /// Decisions dropped by the probability draw
    dropped_count: AtomicU64,

    /// Decisions dropped because the target is excluded
    excluded_count: AtomicU64,
}

impl SamplerMetrics {
    pub const fn new() -> Self {
        Self {
            sampled_count: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            excluded_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn sampled_count(&self) -> u64 {
        self.sampled_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn excluded_count(&self) -> u64 {
        self.excluded_count.load(Ordering::Relaxed)
    }

    pub fn total_count(&self) -> u64 {
        self.sampled_count() + self.dropped_count() + self.excluded_count()
    }

    /// Fraction of decisions that admitted the span, 1.0 before any decision.
    pub fn effective_sample_rate(&self) -> f64 {
        let total = self.total_count() as f64;
        if total == 0.0 {
            1.0
        } else {
            self.sampled_count() as f64 / total
        }
    }

    pub fn reset(&self) {
        self.sampled_count.store(0, Ordering::Relaxed);
        self.dropped_count.store(0, Ordering::Relaxed);
        self.excluded_count.store(0, Ordering::Relaxed);
    }

    fn record(&self, decision: SamplingDecision) -> SamplingDecision {
        match decision {
            SamplingDecision::RecordAndSample => self.sampled_count.fetch_add(1, Ordering::Relaxed),
            SamplingDecision::Drop => self.dropped_count.fetch_add(1, Ordering::Relaxed),
        };
        decision
    }

    fn record_excluded(&self) -> SamplingDecision {
        self.excluded_count.fetch_add(1, Ordering::Relaxed);
        SamplingDecision::Drop
    }
}

impl Default for SamplerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SamplerMetrics {
    fn clone(&self) -> Self {
        Self {
            sampled_count: AtomicU64::new(self.sampled_count()),
            dropped_count: AtomicU64::new(self.dropped_count()),
            excluded_count: AtomicU64::new(self.excluded_count()),
        }
    }
}

/// Sampler that never records excluded routes
pub struct EndpointExcluder {
    excluded: HashSet<String>,
    probability: f64,
    metrics: SamplerMetrics,
}

impl EndpointExcluder {
    /// `probability` is clamped to `[0.0, 1.0]`.
    pub fn new(excluded: impl IntoIterator<Item = String>, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self {
            excluded: excluded.into_iter().collect(),
            probability,
            metrics: SamplerMetrics::new(),
        }
    }

    pub fn description(&self) -> &'static str {
        "customSampler"
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn is_excluded(&self, target: &str) -> bool {
        self.excluded.contains(target)
    }

    pub fn metrics(&self) -> &SamplerMetrics {
        &self.metrics
    }

    /// Decide with a random draw; admitted with long-run frequency
    /// equal to the configured probability.
    pub fn should_sample(&self, attrs: &[Attr]) -> SamplingDecision {
        if self.targets_excluded(attrs) {
            return self.metrics.record_excluded();
        }

        let decision = if self.probability >= 1.0 {
            SamplingDecision::RecordAndSample
        } else if self.probability <= 0.0 {
            SamplingDecision::Drop
        } else if rand::thread_rng().gen::<f64>() < self.probability {
            SamplingDecision::RecordAndSample
        } else {
            SamplingDecision::Drop
        };
        self.metrics.record(decision)
    }

    /// Decide from the trace id so every span of a trace gets the same
    /// answer: the lower 64 bits, shifted right once, are compared with
    /// `probability * 2^63`.
    pub fn should_sample_trace(&self, trace_id: u128, attrs: &[Attr]) -> SamplingDecision {
        if self.targets_excluded(attrs) {
            return self.metrics.record_excluded();
        }

        let decision = if self.probability >= 1.0 {
            SamplingDecision::RecordAndSample
        } else {
            let bound = (self.probability * (1u64 << 63) as f64) as u64;
            if (trace_id as u64) >> 1 < bound {
                SamplingDecision::RecordAndSample
            } else {
                SamplingDecision::Drop
            }
        };
        self.metrics.record(decision)
    }

    fn targets_excluded(&self, attrs: &[Attr]) -> bool {
        attrs.iter().any(|attr| {
            attr.key == TARGET_KEY
                && match &attr.value {
                    FieldValue::String(target) => self.is_excluded(target),
                    _ => false,
                }
        })
    }
}

impl std::fmt::Debug for EndpointExcluder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointExcluder")
            .field("excluded", &self.excluded)
            .field("probability", &self.probability)
            .field("metrics", &self.metrics)
            .finish()
    }
}

/// Settings a tracing bootstrap needs; only the sampler is built here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub service_name: String,
    /// Collector endpoint, `host:port`
    pub host: String,
    pub excluded_routes: Vec<String>,
    pub probability: f64,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            host: String::new(),
            excluded_routes: Vec::new(),
            probability: 1.0,
        }
    }
}

impl TracingConfig {
    pub fn sampler(&self) -> EndpointExcluder {
        EndpointExcluder::new(self.excluded_routes.iter().cloned(), self.probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(route: &str) -> Vec<Attr> {
        vec![Attr::new("http.method", "GET"), Attr::new(TARGET_KEY, route)]
    }

    #[test]
    fn test_probability_clamped() {
        assert_eq!(EndpointExcluder::new(Vec::new(), 1.5).probability(), 1.0);
        assert_eq!(EndpointExcluder::new(Vec::new(), -0.5).probability(), 0.0);
        assert_eq!(EndpointExcluder::new(Vec::new(), f64::NAN).probability(), 0.0);
    }

    #[test]
    fn test_excluded_target_always_dropped() {
        let sampler = EndpointExcluder::new(["/healthz".to_string(), "/metrics".to_string()], 1.0);

        for _ in 0..10 {
            assert_eq!(sampler.should_sample(&target("/healthz")), SamplingDecision::Drop);
            assert_eq!(
                sampler.should_sample_trace(u128::MAX, &target("/metrics")),
                SamplingDecision::Drop
            );
        }
        assert_eq!(sampler.metrics().excluded_count(), 20);
        assert_eq!(sampler.metrics().sampled_count(), 0);
    }

    #[test]
    fn test_exclusion_is_exact_match_on_target_key() {
        let sampler = EndpointExcluder::new(["/healthz".to_string()], 1.0);

        assert!(sampler.should_sample(&target("/healthz/deep")).is_sampled());
        assert!(sampler.should_sample(&[Attr::new("route", "/healthz")]).is_sampled());
        // attribute order does not matter
        let reordered = [Attr::new(TARGET_KEY, "/healthz"), Attr::new("http.method", "GET")];
        assert!(!sampler.should_sample(&reordered).is_sampled());
    }

    #[test]
    fn test_probability_bounds() {
        let never = EndpointExcluder::new(Vec::new(), 0.0);
        let always = EndpointExcluder::new(Vec::new(), 1.0);

        for _ in 0..100 {
            assert_eq!(never.should_sample(&target("/v1")), SamplingDecision::Drop);
            assert_eq!(always.should_sample(&target("/v1")), SamplingDecision::RecordAndSample);
        }
        assert_eq!(never.metrics().dropped_count(), 100);
        assert_eq!(always.metrics().effective_sample_rate(), 1.0);
    }

    #[test]
    fn test_statistical_rate() {
        let sampler = EndpointExcluder::new(Vec::new(), 0.5);

        let total = 10000;
        let sampled = (0..total)
            .filter(|_| sampler.should_sample(&target("/v1")).is_sampled())
            .count();

        let rate = sampled as f64 / total as f64;
        assert!(
            (0.45..=0.55).contains(&rate),
            "Expected ~50% sample rate, got {}%",
            rate * 100.0
        );
        assert_eq!(sampler.metrics().total_count(), total as u64);
    }

    #[test]
    fn test_trace_ratio_is_deterministic() {
        let sampler = EndpointExcluder::new(Vec::new(), 0.25);

        // lower 64 bits decide; the high half is ignored
        assert!(sampler.should_sample_trace(0, &[]).is_sampled());
        assert!(sampler.should_sample_trace(7u128 << 64, &[]).is_sampled());
        assert!(!sampler.should_sample_trace(u64::MAX as u128, &[]).is_sampled());

        let id = 0x1234_5678_9abc_def0_u128;
        let first = sampler.should_sample_trace(id, &[]);
        for _ in 0..10 {
            assert_eq!(sampler.should_sample_trace(id, &[]), first);
        }
    }

    #[test]
    fn test_description() {
        assert_eq!(EndpointExcluder::new(Vec::new(), 1.0).description(), "customSampler");
    }

    #[test]
    fn test_tracing_config_serde() {
        let config: TracingConfig = serde_json::from_str(
            r#"{"service_name":"node","host":"collector:4317","excluded_routes":["/healthz"],"probability":0.1}"#,
        )
        .unwrap();
        assert_eq!(config.service_name, "node");

        let sampler = config.sampler();
        assert!(sampler.is_excluded("/healthz"));
        assert_eq!(sampler.probability(), 0.1);

        let defaults: TracingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults.probability, 1.0);
        assert!(defaults.excluded_routes.is_empty());
    }

    #[test]
    fn test_metrics_reset() {
        let sampler = EndpointExcluder::new(["/healthz".to_string()], 1.0);
        sampler.should_sample(&target("/healthz"));
        sampler.should_sample(&target("/v1"));

        let snapshot = sampler.metrics().clone();
        sampler.metrics().reset();

        assert_eq!(snapshot.total_count(), 2);
        assert_eq!(sampler.metrics().total_count(), 0);
    }
}
