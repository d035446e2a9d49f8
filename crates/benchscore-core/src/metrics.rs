//! Global atomic counters for scoring observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. at the end of a batch).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters.
pub struct Metrics {
    evaluations_completed: AtomicU64,
    analyses_degraded: AtomicU64,
    domain_evaluations: AtomicU64,
    aggregations: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            evaluations_completed: AtomicU64::new(0),
            analyses_degraded: AtomicU64::new(0),
            domain_evaluations: AtomicU64::new(0),
            aggregations: AtomicU64::new(0),
        }
    }

    /// Increment the completed-evaluations counter by one.
    pub fn inc_evaluations_completed(&self) {
        self.evaluations_completed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "evaluations_completed", "counter incremented");
    }

    /// Increment the degraded-analyses counter by one.
    pub fn inc_analyses_degraded(&self) {
        self.analyses_degraded.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "analyses_degraded", "counter incremented");
    }

    /// Increment the domain-evaluations counter by one.
    pub fn inc_domain_evaluations(&self) {
        self.domain_evaluations.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "domain_evaluations", "counter incremented");
    }

    /// Increment the aggregations counter by one.
    pub fn inc_aggregations(&self) {
        self.aggregations.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "aggregations", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            evaluations_completed = self.evaluations_completed(),
            analyses_degraded = self.analyses_degraded(),
            domain_evaluations = self.domain_evaluations(),
            aggregations = self.aggregations(),
        );
    }

    pub fn evaluations_completed(&self) -> u64 {
        self.evaluations_completed.load(Ordering::Relaxed)
    }

    pub fn analyses_degraded(&self) -> u64 {
        self.analyses_degraded.load(Ordering::Relaxed)
    }

    pub fn domain_evaluations(&self) -> u64 {
        self.domain_evaluations.load(Ordering::Relaxed)
    }

    pub fn aggregations(&self) -> u64 {
        self.aggregations.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.evaluations_completed.store(0, Ordering::Relaxed);
        self.analyses_degraded.store(0, Ordering::Relaxed);
        self.domain_evaluations.store(0, Ordering::Relaxed);
        self.aggregations.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_increment() {
        let m = Metrics::new();
        assert_eq!(m.evaluations_completed(), 0);
        m.inc_evaluations_completed();
        m.inc_evaluations_completed();
        assert_eq!(m.evaluations_completed(), 2);

        m.inc_analyses_degraded();
        assert_eq!(m.analyses_degraded(), 1);

        m.inc_domain_evaluations();
        m.inc_aggregations();
        m.inc_aggregations();
        assert_eq!(m.domain_evaluations(), 1);
        assert_eq!(m.aggregations(), 2);
    }

    #[test]
    fn reset_zeroes_all() {
        let m = Metrics::new();
        m.inc_evaluations_completed();
        m.inc_analyses_degraded();
        m.inc_domain_evaluations();
        m.inc_aggregations();
        m.reset();
        assert_eq!(m.evaluations_completed(), 0);
        assert_eq!(m.analyses_degraded(), 0);
        assert_eq!(m.domain_evaluations(), 0);
        assert_eq!(m.aggregations(), 0);
    }
}
