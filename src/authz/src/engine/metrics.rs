//! Decision counters

use crate::types::Outcome;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of decision counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Total number of answered queries
    pub total_requests: u64,

    pub allowed_decisions: u64,
    pub denied_decisions: u64,
    pub unknown_decisions: u64,

    /// Queries rejected with a precondition error
    pub error_count: u64,
}

impl EngineMetrics {
    /// Fraction of answered queries that were allowed
    pub fn allow_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.allowed_decisions as f64 / self.total_requests as f64
        }
    }

    /// Fraction of answered queries for which no rule applied
    pub fn unknown_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.unknown_decisions as f64 / self.total_requests as f64
        }
    }
}

/// Lock-free decision counters
///
/// Atomics let queries record outcomes while holding only a shared borrow
/// (or a read lock in [`crate::shared::SharedRegistry`]).
#[derive(Debug, Default)]
pub struct MetricsCollector {
    allowed: AtomicU64,
    denied: AtomicU64,
    unknown: AtomicU64,
    errors: AtomicU64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_decision(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Allowed => &self.allowed,
            Outcome::Denied => &self.denied,
            Outcome::Unknown => &self.unknown,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_metrics(&self) -> EngineMetrics {
        let allowed_decisions = self.allowed.load(Ordering::Relaxed);
        let denied_decisions = self.denied.load(Ordering::Relaxed);
        let unknown_decisions = self.unknown.load(Ordering::Relaxed);

        EngineMetrics {
            total_requests: allowed_decisions + denied_decisions + unknown_decisions,
            allowed_decisions,
            denied_decisions,
            unknown_decisions,
            error_count: self.errors.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.allowed.store(0, Ordering::Relaxed);
        self.denied.store(0, Ordering::Relaxed);
        self.unknown.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
    }
}

impl Clone for MetricsCollector {
    fn clone(&self) -> Self {
        let snapshot = self.get_metrics();
        Self {
            allowed: AtomicU64::new(snapshot.allowed_decisions),
            denied: AtomicU64::new(snapshot.denied_decisions),
            unknown: AtomicU64::new(snapshot.unknown_decisions),
            errors: AtomicU64::new(snapshot.error_count),
        }
    }
}
