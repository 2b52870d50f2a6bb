//! Asset Reference Module
//!
//! Parses CMS-style image asset references of the form
//! `image-<id>-<width>x<height>-<format>`, e.g.
//! `image-a1b2c3d4e5-2000x3000-jpg`. The embedded dimensions are the
//! asset's intrinsic pixel size and bound what transforms may ask for.

use std::fmt;
use std::str::FromStr;

use crate::error::{ApiError, Result};

/// Longest accepted asset reference, matching the cache key bound.
const MAX_REF_LENGTH: usize = 200;

// == Image Format ==
/// Output formats the CDN can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpg,
    Png,
    Webp,
    Avif,
    Gif,
}

impl ImageFormat {
    /// File extension / query value for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
            ImageFormat::Avif => "avif",
            ImageFormat::Gif => "gif",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "png" => Ok(ImageFormat::Png),
            "webp" => Ok(ImageFormat::Webp),
            "avif" => Ok(ImageFormat::Avif),
            "gif" => Ok(ImageFormat::Gif),
            other => Err(format!("Unknown image format '{}'", other)),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Asset Ref ==
/// A parsed image asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    /// Opaque asset id (the hash segment of the reference)
    pub id: String,
    /// Intrinsic width in pixels
    pub width: u32,
    /// Intrinsic height in pixels
    pub height: u32,
    /// Source format
    pub format: ImageFormat,
}

impl AssetRef {
    /// Parses a reference of the form `image-<id>-<W>x<H>-<format>`.
    ///
    /// A malformed reference is a request error, answered with 400 at the
    /// HTTP layer; it never reaches the cache.
    pub fn parse(reference: &str) -> Result<Self> {
        if reference.len() > MAX_REF_LENGTH {
            return Err(ApiError::InvalidAsset(format!(
                "Reference exceeds {} characters",
                MAX_REF_LENGTH
            )));
        }

        let rest = reference.strip_prefix("image-").ok_or_else(|| {
            ApiError::InvalidAsset(format!("Reference '{}' must start with 'image-'", reference))
        })?;

        // rest = <id>-<W>x<H>-<format>; the id itself never contains '-'
        let mut parts = rest.split('-');
        let (id, dims, format) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(id), Some(dims), Some(format), None) => (id, dims, format),
            _ => {
                return Err(ApiError::InvalidAsset(format!(
                    "Reference '{}' is not of the form image-<id>-<WxH>-<format>",
                    reference
                )))
            }
        };

        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ApiError::InvalidAsset(format!(
                "Asset id '{}' must be non-empty and alphanumeric",
                id
            )));
        }

        let (width, height) = dims
            .split_once('x')
            .and_then(|(w, h)| Some((w.parse::<u32>().ok()?, h.parse::<u32>().ok()?)))
            .filter(|&(w, h)| w > 0 && h > 0)
            .ok_or_else(|| {
                ApiError::InvalidAsset(format!("Dimensions '{}' are not <W>x<H>", dims))
            })?;

        let format = format
            .parse::<ImageFormat>()
            .map_err(ApiError::InvalidAsset)?;

        Ok(Self {
            id: id.to_string(),
            width,
            height,
            format,
        })
    }
}
