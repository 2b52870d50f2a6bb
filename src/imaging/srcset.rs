//! Srcset Module
//!
//! Builds responsive-image candidate sets: one URL per ladder width, capped
//! at the asset's intrinsic width, rendered both as structured candidates
//! and as the HTML `srcset` attribute string.

use serde::{Deserialize, Serialize};

use crate::imaging::{AssetRef, TransformOptions, UrlBuilder};

/// Ladder used when a request does not name its own widths.
pub const DEFAULT_WIDTH_LADDER: [u32; 6] = [320, 640, 768, 1024, 1280, 1920];

// == Srcset Candidate ==
/// One rung of the ladder: a rendered URL and its width descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcSetCandidate {
    pub url: String,
    pub width: u32,
}

// == Srcset ==
/// A complete candidate set for one asset and option set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcSet {
    /// Candidates in ascending width order
    pub candidates: Vec<SrcSetCandidate>,
    /// The rendered `srcset` attribute value
    pub attribute: String,
}

// == Build Srcset ==
/// Renders a candidate per requested width.
///
/// Widths are deduplicated, sorted ascending, and capped at the asset's
/// intrinsic width: the CDN cannot add pixels, so upscale rungs are dropped.
/// If every rung is wider than the asset, the asset's own width becomes the
/// single candidate.
pub fn build_srcset(
    builder: &UrlBuilder,
    asset: &AssetRef,
    opts: &TransformOptions,
    widths: &[u32],
) -> SrcSet {
    let mut ladder: Vec<u32> = widths.iter().copied().filter(|&w| w <= asset.width).collect();
    ladder.sort_unstable();
    ladder.dedup();
    if ladder.is_empty() {
        ladder.push(asset.width);
    }

    let candidates: Vec<SrcSetCandidate> = ladder
        .into_iter()
        .map(|width| SrcSetCandidate {
            url: builder.build(asset, &opts.with_width(width)),
            width,
        })
        .collect();

    let attribute = candidates
        .iter()
        .map(|c| format!("{} {}w", c.url, c.width))
        .collect::<Vec<_>>()
        .join(", ");

    SrcSet {
        candidates,
        attribute,
    }
}
