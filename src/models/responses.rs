//! Response DTOs for the URL service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::imaging::SrcSetCandidate;

/// Response body for the image endpoint (GET /image/:asset)
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrlResponse {
    /// The requested asset reference
    pub asset: String,
    /// The generated CDN URL
    pub url: String,
    /// Whether the URL came from the cache
    pub cached: bool,
}

impl ImageUrlResponse {
    /// Creates a new ImageUrlResponse
    pub fn new(asset: impl Into<String>, url: impl Into<String>, cached: bool) -> Self {
        Self {
            asset: asset.into(),
            url: url.into(),
            cached,
        }
    }
}

/// Response body for the srcset endpoint (GET /srcset/:asset)
#[derive(Debug, Clone, Serialize)]
pub struct SrcSetResponse {
    /// The requested asset reference
    pub asset: String,
    /// One entry per ladder rung, ascending width
    pub candidates: Vec<SrcSetCandidate>,
    /// The rendered `srcset` attribute value
    pub srcset: String,
    /// Whether the set came from the cache
    pub cached: bool,
}

impl SrcSetResponse {
    /// Creates a new SrcSetResponse
    pub fn new(
        asset: impl Into<String>,
        candidates: Vec<SrcSetCandidate>,
        srcset: impl Into<String>,
        cached: bool,
    ) -> Self {
        Self {
            asset: asset.into(),
            candidates,
            srcset: srcset.into(),
            cached,
        }
    }
}

/// Response body for a single-key purge (DELETE /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    /// The purged key
    pub key: String,
    /// Whether the key was present
    pub removed: bool,
}

impl PurgeResponse {
    /// Creates a new PurgeResponse
    pub fn new(key: impl Into<String>, removed: bool) -> Self {
        Self {
            key: key.into(),
            removed,
        }
    }
}

/// Response body for a full clear (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// How many entries were dropped
    pub cleared: usize,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new(cleared: usize) -> Self {
        Self { cleared }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that missed
    pub misses: u64,
    /// Entries dropped to satisfy a budget
    pub evictions: u64,
    /// Values refused at insert time
    pub rejections: u64,
    /// Entries currently held
    pub total_entries: usize,
    /// Entries still inside the expiry window
    pub valid_entries: usize,
    /// Entries past the window, not yet swept
    pub expired_entries: usize,
    /// Estimated bytes charged against the budget
    pub memory_bytes: usize,
    /// Budget utilization percentage, capped at 100
    pub memory_utilization: f64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a cache snapshot
    pub fn from_stats(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            rejections: stats.rejections,
            total_entries: stats.total_entries,
            valid_entries: stats.valid_entries,
            expired_entries: stats.expired_entries,
            memory_bytes: stats.memory_bytes,
            memory_utilization: stats.memory_utilization,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
