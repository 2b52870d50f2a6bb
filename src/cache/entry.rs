//! Cache Entry Module
//!
//! Defines the memoized payload and the per-entry bookkeeping the store
//! needs for expiry and byte accounting.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

// == Cached Value ==
/// A memoized payload.
///
/// URL generation produces plain strings; srcset generation produces a
/// structured document. Both flow through the same store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CachedValue {
    /// A generated URL string
    Text(String),
    /// A structured document (e.g. a srcset with its candidates)
    Doc(serde_json::Value),
}

impl CachedValue {
    /// True when there is nothing worth remembering.
    ///
    /// The store refuses empty values outright: an empty URL or a null
    /// document would otherwise be served back as a "hit" with no content.
    pub fn is_empty(&self) -> bool {
        match self {
            CachedValue::Text(s) => s.is_empty(),
            CachedValue::Doc(v) => v.is_null(),
        }
    }
}

impl From<String> for CachedValue {
    fn from(s: String) -> Self {
        CachedValue::Text(s)
    }
}

impl From<serde_json::Value> for CachedValue {
    fn from(v: serde_json::Value) -> Self {
        CachedValue::Doc(v)
    }
}

// == Cache Entry ==
/// A stored value with its insertion timestamp and estimated footprint.
///
/// Entries are owned exclusively by the store's map and die on eviction,
/// expiry, or clear.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The memoized value
    pub value: CachedValue,
    /// Insertion timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Estimated size in bytes, as charged against the memory budget
    pub size: usize,
}

impl CacheEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(value: CachedValue, size: usize) -> Self {
        Self {
            value,
            created_at: current_timestamp_ms(),
            size,
        }
    }

    /// Checks whether the entry has outlived the store's expiry window.
    ///
    /// Boundary condition: an entry is expired once its age is greater than
    /// or equal to the window, so a zero-length window expires everything
    /// immediately.
    pub fn is_expired(&self, window_ms: u64) -> bool {
        self.age_ms() >= window_ms
    }

    /// Milliseconds since insertion. Clamped to zero if the clock moved
    /// backwards between insertion and now.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.created_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
