//! Cache Module
//!
//! Memory-bounded memoization for generated image URLs: approximate byte
//! accounting, oldest-first eviction, and lazy wall-clock expiry.

mod entry;
mod order;
mod pressure;
mod size;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, CachedValue};
pub use order::AccessOrder;
pub use pressure::{MemoryPressure, NoPressure};
pub use size::estimate_size;
pub use stats::CacheStats;
pub use store::UrlCache;

// == Public Constants ==
/// Maximum allowed cache key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// A single entry may use at most this fraction of the memory budget:
/// budget / OVERSIZE_DIVISOR. Larger values are rejected, never stored.
pub const OVERSIZE_DIVISOR: usize = 10;
