use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters maintained by [`crate::MemoryStore`].
#[derive(Debug, Default)]
pub struct StoreMetrics {
    pub hits_total: AtomicU64,
    pub misses_total: AtomicU64,
    pub evictions_total: AtomicU64,
    pub sweeps_total: AtomicU64,
}

impl StoreMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_hit(&self) {
        self.hits_total.fetch_add(1, Ordering::Relaxed);
    }
    pub fn inc_miss(&self) {
        self.misses_total.fetch_add(1, Ordering::Relaxed);
    }
    pub fn inc_evictions(&self, n: u64) {
        self.evictions_total.fetch_add(n, Ordering::Relaxed);
    }
    pub fn inc_sweeps(&self) {
        self.sweeps_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, active_sessions: usize) -> StoreStats {
        StoreStats {
            active_sessions,
            hits: self.hits_total.load(Ordering::Relaxed),
            misses: self.misses_total.load(Ordering::Relaxed),
            evictions: self.evictions_total.load(Ordering::Relaxed),
            sweeps: self.sweeps_total.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of store activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub active_sessions: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub sweeps: u64,
}
