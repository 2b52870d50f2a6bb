//! Cache Statistics Module
//!
//! Tracks hit/miss/eviction/rejection counters and carries the snapshot
//! fields the stats endpoint reports.

use serde::Serialize;

// == Cache Stats ==
/// Cache performance counters plus a point-in-time snapshot of occupancy.
///
/// The counters persist across operations; the occupancy fields are filled
/// in when the store takes a snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that missed (absent, expired, or pressure-cleared)
    pub misses: u64,
    /// Entries dropped to satisfy a budget
    pub evictions: u64,
    /// Values refused at insert time (empty or oversized)
    pub rejections: u64,
    /// Entries currently held, valid or not
    pub total_entries: usize,
    /// Entries still inside the expiry window
    pub valid_entries: usize,
    /// Entries past the window, not yet swept
    pub expired_entries: usize,
    /// Estimated bytes currently charged against the budget
    pub memory_bytes: usize,
    /// memory_bytes as a percentage of the budget, capped at 100
    pub memory_utilization: f64,
}

impl CacheStats {
    /// Creates stats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before any reads.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Counter Updates ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    // == Snapshot Fields ==
    /// Fills in the occupancy fields for a snapshot.
    ///
    /// Utilization is capped at 100 even if the raw ratio briefly reads
    /// higher, and reports 0 for a zero budget.
    pub fn set_occupancy(
        &mut self,
        valid: usize,
        expired: usize,
        memory_bytes: usize,
        memory_budget: usize,
    ) {
        self.valid_entries = valid;
        self.expired_entries = expired;
        self.total_entries = valid + expired;
        self.memory_bytes = memory_bytes;
        self.memory_utilization = if memory_budget == 0 {
            0.0
        } else {
            (memory_bytes as f64 / memory_budget as f64 * 100.0).min(100.0)
        };
    }
}
