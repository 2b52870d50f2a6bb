//! Transform Options Module
//!
//! The bounded set of rendering parameters a request may ask for, and the
//! order-stable cache key derived from them.

use std::fmt;
use std::str::FromStr;

use crate::imaging::ImageFormat;

/// Largest width or height a transform may request.
pub const MAX_DIMENSION: u32 = 4096;

/// Largest accepted device pixel ratio.
pub const MAX_DPR: u8 = 3;

/// Largest accepted blur radius.
pub const MAX_BLUR: u16 = 100;

// == Fit Mode ==
/// How the CDN maps source pixels into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    Crop,
    Clip,
    Fill,
    Max,
    Min,
    Scale,
}

impl FitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitMode::Crop => "crop",
            FitMode::Clip => "clip",
            FitMode::Fill => "fill",
            FitMode::Max => "max",
            FitMode::Min => "min",
            FitMode::Scale => "scale",
        }
    }
}

impl FromStr for FitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crop" => Ok(FitMode::Crop),
            "clip" => Ok(FitMode::Clip),
            "fill" => Ok(FitMode::Fill),
            "max" => Ok(FitMode::Max),
            "min" => Ok(FitMode::Min),
            "scale" => Ok(FitMode::Scale),
            other => Err(format!("Unknown fit mode '{}'", other)),
        }
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Transform Options ==
/// Rendering parameters for one URL build. All optional; absent fields are
/// left to the CDN's defaults and never appear in the URL or the cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Target width in pixels
    pub width: Option<u32>,
    /// Target height in pixels
    pub height: Option<u32>,
    /// Encode quality, 1-100
    pub quality: Option<u8>,
    /// Output format override
    pub format: Option<ImageFormat>,
    /// Fit mode
    pub fit: Option<FitMode>,
    /// Device pixel ratio multiplier
    pub dpr: Option<u8>,
    /// Blur radius
    pub blur: Option<u16>,
    /// Let the CDN negotiate the format with the client
    pub auto_format: bool,
}

impl TransformOptions {
    /// Validates every present field against its bounded range.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(w) = self.width {
            if w == 0 || w > MAX_DIMENSION {
                return Some(format!("Width must be between 1 and {}", MAX_DIMENSION));
            }
        }
        if let Some(h) = self.height {
            if h == 0 || h > MAX_DIMENSION {
                return Some(format!("Height must be between 1 and {}", MAX_DIMENSION));
            }
        }
        if let Some(q) = self.quality {
            if q == 0 || q > 100 {
                return Some("Quality must be between 1 and 100".to_string());
            }
        }
        if let Some(d) = self.dpr {
            if d == 0 || d > MAX_DPR {
                return Some(format!("Dpr must be between 1 and {}", MAX_DPR));
            }
        }
        if let Some(b) = self.blur {
            if b > MAX_BLUR {
                return Some(format!("Blur must be at most {}", MAX_BLUR));
            }
        }
        None
    }

    /// Derives the cache key for this option set applied to an asset.
    ///
    /// Fields are rendered in a fixed order with absent fields skipped, so
    /// two equal option sets always agree on the key regardless of how the
    /// request spelled them. Bounded: every field prints a short token and
    /// the asset id is length-checked at parse time.
    pub fn cache_key(&self, asset_id: &str) -> String {
        let mut key = String::from(asset_id);
        if let Some(w) = self.width {
            key.push_str(&format!("|w{}", w));
        }
        if let Some(h) = self.height {
            key.push_str(&format!("|h{}", h));
        }
        if let Some(q) = self.quality {
            key.push_str(&format!("|q{}", q));
        }
        if let Some(f) = self.format {
            key.push_str(&format!("|f{}", f.as_str()));
        }
        if let Some(fit) = self.fit {
            key.push_str(&format!("|fit{}", fit.as_str()));
        }
        if let Some(d) = self.dpr {
            key.push_str(&format!("|dpr{}", d));
        }
        if let Some(b) = self.blur {
            key.push_str(&format!("|blur{}", b));
        }
        if self.auto_format {
            key.push_str("|auto");
        }
        key
    }

    /// A copy of these options with the width replaced, used to walk a
    /// srcset ladder.
    pub fn with_width(&self, width: u32) -> Self {
        Self {
            width: Some(width),
            ..self.clone()
        }
    }
}
