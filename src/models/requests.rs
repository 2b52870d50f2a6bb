//! Request DTOs for the URL service API
//!
//! Defines the query parameters accepted by the image and srcset endpoints
//! and their conversion into validated transform options.

use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::imaging::TransformOptions;

/// Most rungs a srcset request may ask for.
const MAX_SRCSET_WIDTHS: usize = 12;

/// Query parameters for the image endpoint (GET /image/:asset).
///
/// Mirrors the CDN's own parameter names, so callers can pass their
/// existing query strings through unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransformParams {
    /// Target width in pixels
    pub w: Option<u32>,
    /// Target height in pixels
    pub h: Option<u32>,
    /// Encode quality, 1-100
    pub q: Option<u8>,
    /// Output format (jpg, png, webp, avif, gif)
    pub fm: Option<String>,
    /// Fit mode (crop, clip, fill, max, min, scale)
    pub fit: Option<String>,
    /// Device pixel ratio multiplier
    pub dpr: Option<u8>,
    /// Blur radius
    pub blur: Option<u16>,
    /// `auto=format` lets the CDN negotiate the encoding
    pub auto: Option<String>,
}

impl TransformParams {
    /// Converts the raw parameters into validated transform options.
    pub fn into_options(self) -> Result<TransformOptions> {
        let format = self
            .fm
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::InvalidRequest)?;

        let fit = self
            .fit
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::InvalidRequest)?;

        let auto_format = match self.auto.as_deref() {
            None => false,
            Some("format") => true,
            Some(other) => {
                return Err(ApiError::InvalidRequest(format!(
                    "Unsupported auto value '{}', expected 'format'",
                    other
                )))
            }
        };

        let options = TransformOptions {
            width: self.w,
            height: self.h,
            quality: self.q,
            format,
            fit,
            dpr: self.dpr,
            blur: self.blur,
            auto_format,
        };

        if let Some(error_msg) = options.validate() {
            return Err(ApiError::InvalidRequest(error_msg));
        }
        Ok(options)
    }
}

/// Query parameters specific to the srcset endpoint (GET /srcset/:asset).
///
/// Extracted alongside [`TransformParams`] from the same query string; the
/// shared transform parameters apply to every rung, `widths` overrides the
/// default ladder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SrcSetParams {
    /// Comma-separated rung widths, e.g. `widths=320,640,1280`
    pub widths: Option<String>,
}

impl SrcSetParams {
    /// Parses the `widths` list, if present.
    pub fn parse_widths(&self) -> Result<Option<Vec<u32>>> {
        let Some(raw) = self.widths.as_deref() else {
            return Ok(None);
        };

        let widths: Vec<u32> = raw
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|&w| w > 0)
                    .ok_or_else(|| {
                        ApiError::InvalidRequest(format!("Invalid srcset width '{}'", part))
                    })
            })
            .collect::<Result<_>>()?;

        if widths.is_empty() {
            return Err(ApiError::InvalidRequest("Widths list is empty".to_string()));
        }
        if widths.len() > MAX_SRCSET_WIDTHS {
            return Err(ApiError::InvalidRequest(format!(
                "At most {} srcset widths are accepted",
                MAX_SRCSET_WIDTHS
            )));
        }
        Ok(Some(widths))
    }
}
