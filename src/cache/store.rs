//! Cache Store Module
//!
//! The memoization engine: HashMap storage with approximate byte accounting,
//! oldest-first eviction, and lazy expiry. Every operation is infallible;
//! a value that cannot be stored is simply not remembered and the caller
//! rebuilds it.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::cache::{
    estimate_size, AccessOrder, CacheEntry, CacheStats, CachedValue, MemoryPressure, NoPressure,
    MAX_KEY_LENGTH, OVERSIZE_DIVISOR,
};

// == Url Cache ==
/// Memory-bounded memoization store for generated image URLs.
///
/// Bounded three ways: an entry-count budget, an approximate byte budget,
/// and a per-entry cap of one tenth of the byte budget. Entries expire a
/// fixed window after insertion, checked lazily on read.
pub struct UrlCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Eviction-order queue, oldest at the back
    order: AccessOrder,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of entries
    max_entries: usize,
    /// Maximum estimated bytes across all entries
    max_memory_bytes: usize,
    /// Expiry window in milliseconds
    expiry_window_ms: u64,
    /// Running estimated byte total
    memory_bytes: usize,
    /// Host memory signal, consulted on every read
    pressure: Box<dyn MemoryPressure>,
}

impl UrlCache {
    // == Constructors ==
    /// Creates a cache with the given budgets and expiry window, and no
    /// pressure signal.
    ///
    /// # Arguments
    /// * `max_entries` - entry-count budget
    /// * `max_memory_bytes` - approximate byte budget
    /// * `expiry_secs` - seconds after insertion at which an entry is
    ///   treated as absent
    pub fn new(max_entries: usize, max_memory_bytes: usize, expiry_secs: u64) -> Self {
        Self::with_pressure(max_entries, max_memory_bytes, expiry_secs, Box::new(NoPressure))
    }

    /// Same as [`UrlCache::new`] with an explicit pressure probe.
    pub fn with_pressure(
        max_entries: usize,
        max_memory_bytes: usize,
        expiry_secs: u64,
        pressure: Box<dyn MemoryPressure>,
    ) -> Self {
        Self {
            entries: HashMap::new(),
            order: AccessOrder::new(),
            stats: CacheStats::new(),
            max_entries,
            max_memory_bytes,
            expiry_window_ms: expiry_secs * 1000,
            memory_bytes: 0,
            pressure,
        }
    }

    // == Get ==
    /// Looks up a memoized value.
    ///
    /// A hit refreshes the key's recency. An expired entry is removed on
    /// the spot and answered as a miss. If the pressure probe fires, the
    /// whole cache is dropped before the miss is returned.
    pub fn get(&mut self, key: &str) -> Option<CachedValue> {
        if self.pressure.under_pressure() {
            let dropped = self.clear();
            debug!("memory pressure signalled, dropped {} cached entries", dropped);
            self.stats.record_miss();
            return None;
        }

        let expired = match self.entries.get(key) {
            Some(entry) => {
                if !entry.is_expired(self.expiry_window_ms) {
                    let value = entry.value.clone();
                    self.stats.record_hit();
                    self.order.refresh(key);
                    return Some(value);
                }
                true
            }
            None => false,
        };

        if expired {
            self.remove_entry(key);
        }
        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Memoizes a value under a key, evicting oldest entries as needed.
    ///
    /// Never fails: empty values, over-long keys, and values estimated at
    /// more than a tenth of the byte budget are silently refused. An
    /// existing entry under the same key is replaced and its bytes released
    /// before budgets are checked.
    ///
    /// Returns whether the value was actually stored.
    pub fn set(&mut self, key: String, value: CachedValue) -> bool {
        if value.is_empty() || key.len() > MAX_KEY_LENGTH || self.max_entries == 0 {
            self.stats.record_rejection();
            return false;
        }

        let size = estimate_size(&value);
        if size > self.max_memory_bytes / OVERSIZE_DIVISOR {
            self.stats.record_rejection();
            debug!(
                "refused oversized entry for '{}': {} bytes against a {} byte budget",
                key, size, self.max_memory_bytes
            );
            return false;
        }

        // Release the old entry first so an overwrite never double-counts
        self.remove_entry(&key);

        // Evict from the back of the queue until both budgets hold with the
        // new entry in place. The oversize cap above guarantees this loop
        // can always succeed before draining the map.
        while !self.entries.is_empty()
            && (self.entries.len() >= self.max_entries
                || self.memory_bytes + size > self.max_memory_bytes)
        {
            match self.order.take_oldest() {
                Some(oldest) => {
                    if let Some(old) = self.entries.remove(&oldest) {
                        self.memory_bytes = self.memory_bytes.saturating_sub(old.size);
                    }
                    self.stats.record_eviction();
                }
                None => break,
            }
        }

        self.memory_bytes += size;
        self.entries.insert(key.clone(), CacheEntry::new(value, size));
        self.order.refresh(&key);
        true
    }

    // == Delete ==
    /// Removes one entry, releasing its bytes.
    ///
    /// Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Clear ==
    /// Drops every entry and resets the byte counter.
    ///
    /// Returns how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.memory_bytes = 0;
        dropped
    }

    // == Stats ==
    /// Snapshot of counters and occupancy. Non-mutating: expired entries
    /// are counted, not removed.
    pub fn stats(&self) -> CacheStats {
        let expired = self
            .entries
            .values()
            .filter(|entry| entry.is_expired(self.expiry_window_ms))
            .count();
        let valid = self.entries.len() - expired;

        let mut stats = self.stats.clone();
        stats.set_occupancy(valid, expired, self.memory_bytes, self.max_memory_bytes);
        stats
    }

    // == Sweep Expired ==
    /// Removes every entry past the expiry window.
    ///
    /// Returns the number of entries removed. Called by the background
    /// sweep task; reads handle expiry lazily on their own.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.expiry_window_ms))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.remove_entry(&key);
        }
        count
    }

    // == Length ==
    /// Current number of entries, valid or expired.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Estimated bytes currently charged against the budget.
    pub fn memory_bytes(&self) -> usize {
        self.memory_bytes
    }

    // Removes an entry and releases its bytes. Saturating subtraction keeps
    // the counter at zero even if the accounting ever drifts.
    fn remove_entry(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.order.forget(key);
                self.memory_bytes = self.memory_bytes.saturating_sub(entry.size);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for UrlCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlCache")
            .field("entries", &self.entries.len())
            .field("memory_bytes", &self.memory_bytes)
            .field("max_entries", &self.max_entries)
            .field("max_memory_bytes", &self.max_memory_bytes)
            .field("expiry_window_ms", &self.expiry_window_ms)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::size::{ENTRY_OVERHEAD, TEXT_ESTIMATE_CAP};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread::sleep;
    use std::time::Duration;

    fn url(s: &str) -> CachedValue {
        CachedValue::Text(s.to_string())
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = UrlCache::new(100, 1_000_000, 3600);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.memory_bytes(), 0);
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let mut cache = UrlCache::new(100, 1_000_000, 3600);

        assert!(cache.set("k1".to_string(), url("https://cdn/a.webp")));
        assert_eq!(cache.get("k1"), Some(url("https://cdn/a.webp")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_missing_key() {
        let mut cache = UrlCache::new(100, 1_000_000, 3600);
        assert_eq!(cache.get("nope"), None);
    }

    #[test]
    fn test_empty_value_is_silently_refused() {
        let mut cache = UrlCache::new(100, 1_000_000, 3600);

        assert!(!cache.set("k1".to_string(), url("")));
        assert!(!cache.set("k2".to_string(), CachedValue::Doc(serde_json::Value::Null)));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.rejections, 2);
        assert_eq!(cache.memory_bytes(), 0);
    }

    #[test]
    fn test_oversized_value_is_silently_refused() {
        // Budget 1000 bytes, so anything over 100 estimated bytes is refused
        let mut cache = UrlCache::new(100, 1000, 3600);

        let stored = cache.set("big".to_string(), url(&"x".repeat(200)));

        assert!(!stored);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.memory_bytes(), 0);
        assert_eq!(cache.stats().rejections, 1);
    }

    #[test]
    fn test_over_long_key_is_silently_refused() {
        let mut cache = UrlCache::new(100, 1_000_000, 3600);
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        assert!(!cache.set(long_key, url("https://cdn/a.webp")));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_delete_releases_bytes() {
        let mut cache = UrlCache::new(100, 1_000_000, 3600);
        cache.set("k1".to_string(), url("https://cdn/a.webp"));
        assert!(cache.memory_bytes() > 0);

        assert!(cache.delete("k1"));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.memory_bytes(), 0);
    }

    #[test]
    fn test_delete_missing_key() {
        let mut cache = UrlCache::new(100, 1_000_000, 3600);
        assert!(!cache.delete("nope"));
        // Deleting twice must not underflow the counter
        cache.set("k1".to_string(), url("https://cdn/a.webp"));
        assert!(cache.delete("k1"));
        assert!(!cache.delete("k1"));
        assert_eq!(cache.memory_bytes(), 0);
    }

    #[test]
    fn test_overwrite_replaces_and_reaccounts() {
        let mut cache = UrlCache::new(100, 1_000_000, 3600);

        cache.set("k1".to_string(), url(&"a".repeat(100)));
        let first_bytes = cache.memory_bytes();
        cache.set("k1".to_string(), url(&"b".repeat(10)));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k1"), Some(url(&"b".repeat(10))));
        assert_eq!(cache.memory_bytes(), first_bytes - 90);
    }

    #[test]
    fn test_count_budget_evicts_oldest() {
        let mut cache = UrlCache::new(2, 1_000_000, 3600);

        cache.set("a".to_string(), url("x"));
        cache.set("b".to_string(), url("y"));
        cache.set("c".to_string(), url("z"));

        assert_eq!(cache.get("a"), None);
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
        assert_eq!(cache.stats().total_entries, 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_memory_budget_evicts_oldest() {
        // Each 40-byte URL costs 40 + ENTRY_OVERHEAD. The budget fits 12 of
        // them, comfortably above the tenth-of-budget per-entry cap, so the
        // byte budget (not the count budget) drives eviction here.
        let per_entry = 40 + ENTRY_OVERHEAD;
        let budget = per_entry * 12;
        let mut cache = UrlCache::new(100, budget, 3600);

        for i in 0..20 {
            let value = format!("{:0>40}", i);
            assert!(cache.set(format!("k{}", i), url(&value)));
            assert!(
                cache.memory_bytes() <= budget,
                "byte counter {} exceeded budget {}",
                cache.memory_bytes(),
                budget
            );
        }

        // The earliest keys paid for the later ones
        assert_eq!(cache.len(), 12);
        assert_eq!(cache.get("k0"), None);
        assert_eq!(cache.get("k7"), None);
        assert!(cache.get("k8").is_some());
        assert!(cache.get("k19").is_some());
        assert!(cache.stats().evictions >= 8);
    }

    #[test]
    fn test_read_hit_protects_from_eviction() {
        let mut cache = UrlCache::new(2, 1_000_000, 3600);

        cache.set("a".to_string(), url("x"));
        cache.set("b".to_string(), url("y"));

        // Serving "a" makes "b" the eviction candidate
        assert!(cache.get("a").is_some());
        cache.set("c".to_string(), url("z"));

        assert!(cache.get("a").is_some());
        assert_eq!(cache.get("b"), None);
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_expired_entry_is_absent_and_removed() {
        let mut cache = UrlCache::new(100, 1_000_000, 1);

        cache.set("k1".to_string(), url("https://cdn/a.webp"));
        assert!(cache.get("k1").is_some());

        sleep(Duration::from_millis(1100));

        assert_eq!(cache.get("k1"), None);
        // The lazy check also removed the body
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.memory_bytes(), 0);
    }

    #[test]
    fn test_clear_zeroes_occupancy() {
        let mut cache = UrlCache::new(100, 1_000_000, 3600);
        cache.set("a".to_string(), url("x"));
        cache.set("b".to_string(), url("y"));

        assert_eq!(cache.clear(), 2);

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.memory_bytes, 0);
        assert_eq!(stats.memory_utilization, 0.0);
    }

    #[test]
    fn test_sweep_expired_removes_only_aged_entries() {
        let mut cache = UrlCache::new(100, 1_000_000, 3600);
        cache.set("old".to_string(), url("x"));
        cache.set("fresh".to_string(), url("y"));

        // Backdate one entry past the window
        cache.entries.get_mut("old").unwrap().created_at -= 3_600_001;

        assert_eq!(cache.sweep_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("fresh").is_some());
        assert_eq!(cache.get("old"), None);
    }

    #[test]
    fn test_stats_split_valid_and_expired() {
        let mut cache = UrlCache::new(100, 1_000_000, 3600);
        cache.set("old".to_string(), url("x"));
        cache.set("fresh".to_string(), url("y"));
        cache.entries.get_mut("old").unwrap().created_at -= 3_600_001;

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 1);
        assert_eq!(stats.expired_entries, 1);
        // stats() does not sweep
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_hit_and_miss_counters() {
        let mut cache = UrlCache::new(100, 1_000_000, 3600);
        cache.set("k1".to_string(), url("x"));

        cache.get("k1");
        cache.get("k1");
        cache.get("absent");

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_entry_budget_refuses_everything() {
        let mut cache = UrlCache::new(0, 1_000_000, 3600);
        assert!(!cache.set("k1".to_string(), url("x")));
        assert_eq!(cache.len(), 0);
    }

    // Toggleable probe for the defensive-clear path
    struct FlaggedPressure(Arc<AtomicBool>);

    impl MemoryPressure for FlaggedPressure {
        fn under_pressure(&self) -> bool {
            self.0.load(Ordering::Relaxed)
        }
    }

    #[test]
    fn test_pressure_clears_cache_and_misses() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut cache = UrlCache::with_pressure(
            100,
            1_000_000,
            3600,
            Box::new(FlaggedPressure(flag.clone())),
        );

        cache.set("k1".to_string(), url("https://cdn/a.webp"));
        assert!(cache.get("k1").is_some());

        flag.store(true, Ordering::Relaxed);
        assert_eq!(cache.get("k1"), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.memory_bytes(), 0);

        // Once the signal drops, the cache fills again normally
        flag.store(false, Ordering::Relaxed);
        assert!(cache.set("k2".to_string(), url("https://cdn/b.webp")));
        assert!(cache.get("k2").is_some());
    }

    #[test]
    fn test_text_cap_bounds_the_charge() {
        // A value longer than the text cap is charged at the cap, which is
        // still over a tenth of this budget and therefore refused.
        let mut cache = UrlCache::new(100, TEXT_ESTIMATE_CAP, 3600);
        let stored = cache.set("big".to_string(), url(&"x".repeat(TEXT_ESTIMATE_CAP * 2)));
        assert!(!stored);
    }
}
