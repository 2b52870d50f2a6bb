//! Imaging Module
//!
//! Asset references, transform options, and the CDN URL builder whose output
//! the cache memoizes. URL generation is deterministic: the same asset and
//! options always render the same URL and the same cache key.

mod asset;
mod builder;
mod srcset;
mod transform;

// Re-export public types
pub use asset::{AssetRef, ImageFormat};
pub use builder::UrlBuilder;
pub use srcset::{build_srcset, SrcSet, SrcSetCandidate, DEFAULT_WIDTH_LADDER};
pub use transform::{FitMode, TransformOptions};
