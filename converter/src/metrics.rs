//! Counters for coordinator activity.

use std::sync::atomic::{AtomicU64, Ordering};

/// Coordinator metrics.
pub struct Metrics {
    /// Total events dispatched.
    pub events_total: AtomicU64,
    /// Amount edits rejected by the input filter.
    pub amount_edits_rejected: AtomicU64,
    /// Refreshes blocked by an invalid amount.
    pub refreshes_blocked: AtomicU64,
    /// Rate fetches issued.
    pub fetches_started: AtomicU64,
    /// Rate fetches that produced a rate.
    pub fetches_succeeded: AtomicU64,
    /// Rate fetches that failed.
    pub fetches_failed: AtomicU64,
    /// Fetch results discarded because a newer request superseded them.
    pub stale_responses_dropped: AtomicU64,
}

impl Metrics {
    /// Create new metrics instance.
    pub fn new() -> Self {
        Self {
            events_total: AtomicU64::new(0),
            amount_edits_rejected: AtomicU64::new(0),
            refreshes_blocked: AtomicU64::new(0),
            fetches_started: AtomicU64::new(0),
            fetches_succeeded: AtomicU64::new(0),
            fetches_failed: AtomicU64::new(0),
            stale_responses_dropped: AtomicU64::new(0),
        }
    }

    pub fn event_dispatched(&self) {
        self.events_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn amount_edit_rejected(&self) {
        self.amount_edits_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn refresh_blocked(&self) {
        self.refreshes_blocked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_started(&self) {
        self.fetches_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_succeeded(&self) {
        self.fetches_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failed(&self) {
        self.fetches_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stale_response_dropped(&self) {
        self.stale_responses_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_total: self.events_total.load(Ordering::Relaxed),
            amount_edits_rejected: self.amount_edits_rejected.load(Ordering::Relaxed),
            refreshes_blocked: self.refreshes_blocked.load(Ordering::Relaxed),
            fetches_started: self.fetches_started.load(Ordering::Relaxed),
            fetches_succeeded: self.fetches_succeeded.load(Ordering::Relaxed),
            fetches_failed: self.fetches_failed.load(Ordering::Relaxed),
            stale_responses_dropped: self.stale_responses_dropped.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time metrics snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub events_total: u64,
    pub amount_edits_rejected: u64,
    pub refreshes_blocked: u64,
    pub fetches_started: u64,
    pub fetches_succeeded: u64,
    pub fetches_failed: u64,
    pub stale_responses_dropped: u64,
}

impl MetricsSnapshot {
    /// Fetches issued but not yet resolved or superseded.
    pub fn fetches_outstanding(&self) -> u64 {
        self.fetches_started.saturating_sub(
            self.fetches_succeeded + self.fetches_failed + self.stale_responses_dropped,
        )
    }
}
