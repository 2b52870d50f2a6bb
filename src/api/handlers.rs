//! API Handlers
//!
//! HTTP request handlers for each URL service endpoint. Handlers own the
//! memoization protocol: derive the cache key, try the cache, build on a
//! miss, store the result.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{CachedValue, UrlCache};
use crate::error::Result;
use crate::imaging::{
    build_srcset, AssetRef, SrcSet, TransformOptions, UrlBuilder, DEFAULT_WIDTH_LADDER,
};
use crate::models::{
    ClearResponse, HealthResponse, ImageUrlResponse, PurgeResponse, SrcSetParams, SrcSetResponse,
    StatsResponse, TransformParams,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe memoization cache
    pub cache: Arc<RwLock<UrlCache>>,
    /// CDN URL renderer
    pub builder: Arc<UrlBuilder>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(cache: UrlCache, builder: UrlBuilder) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            builder: Arc::new(builder),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let cache = UrlCache::new(
            config.max_entries,
            config.max_memory_bytes,
            config.entry_ttl,
        );
        let builder = UrlBuilder::new(config.cdn_base_url.clone());
        Self::new(cache, builder)
    }
}

/// Cache key for a srcset request: the transform key plus the normalized
/// rung list. Keeping the rungs in the key separates srcset entries from
/// plain URL entries for the same asset and options.
fn srcset_cache_key(options: &TransformOptions, asset_id: &str, widths: &[u32]) -> String {
    let rungs = widths
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("{}|set[{}]", options.cache_key(asset_id), rungs)
}

/// Handler for GET /image/:asset
///
/// Builds (or recalls) the CDN URL for one asset and option set.
pub async fn image_handler(
    State(state): State<AppState>,
    Path(asset_ref): Path<String>,
    Query(params): Query<TransformParams>,
) -> Result<Json<ImageUrlResponse>> {
    let asset = AssetRef::parse(&asset_ref)?;
    let options = params.into_options()?;
    let key = options.cache_key(&asset.id);

    // Write lock even for the lookup: a hit refreshes recency and counters
    let mut cache = state.cache.write().await;
    if let Some(CachedValue::Text(url)) = cache.get(&key) {
        return Ok(Json(ImageUrlResponse::new(asset_ref, url, true)));
    }

    let url = state.builder.build(&asset, &options);
    cache.set(key, CachedValue::Text(url.clone()));

    Ok(Json(ImageUrlResponse::new(asset_ref, url, false)))
}

/// Handler for GET /srcset/:asset
///
/// Builds (or recalls) the responsive candidate set for one asset.
pub async fn srcset_handler(
    State(state): State<AppState>,
    Path(asset_ref): Path<String>,
    Query(params): Query<TransformParams>,
    Query(srcset_params): Query<SrcSetParams>,
) -> Result<Json<SrcSetResponse>> {
    let asset = AssetRef::parse(&asset_ref)?;
    let options = params.into_options()?;

    let mut ladder = srcset_params
        .parse_widths()?
        .unwrap_or_else(|| DEFAULT_WIDTH_LADDER.to_vec());
    ladder.sort_unstable();
    ladder.dedup();

    let key = srcset_cache_key(&options, &asset.id, &ladder);

    let mut cache = state.cache.write().await;
    if let Some(CachedValue::Doc(doc)) = cache.get(&key) {
        // A document that no longer decodes is treated as a miss and rebuilt
        if let Ok(set) = serde_json::from_value::<SrcSet>(doc) {
            return Ok(Json(SrcSetResponse::new(
                asset_ref,
                set.candidates,
                set.attribute,
                true,
            )));
        }
    }

    let set = build_srcset(&state.builder, &asset, &options, &ladder);
    if let Ok(doc) = serde_json::to_value(&set) {
        cache.set(key, CachedValue::Doc(doc));
    }

    Ok(Json(SrcSetResponse::new(
        asset_ref,
        set.candidates,
        set.attribute,
        false,
    )))
}

/// Handler for DELETE /cache/:key
///
/// Purges a single memoized entry. Never fails; purging an absent key just
/// reports `removed: false`.
pub async fn purge_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<PurgeResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.delete(&key);

    Json(PurgeResponse::new(key, removed))
}

/// Handler for DELETE /cache
///
/// Drops every memoized entry.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    let cleared = cache.clear();

    Json(ClearResponse::new(cleared))
}

/// Handler for GET /stats
///
/// Returns the current cache snapshot.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    // Read lock is enough: the snapshot does not mutate
    let cache = state.cache.read().await;
    let stats = cache.stats();

    Json(StatsResponse::from_stats(&stats))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
