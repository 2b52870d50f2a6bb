//! URL Builder Module
//!
//! Renders the final CDN URL for an asset plus transform options. This is
//! the pure function the cache memoizes: same inputs, same string.

use crate::imaging::{AssetRef, TransformOptions};

// == Url Builder ==
/// Stateless renderer for CDN image URLs.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    /// CDN endpoint, stored without a trailing slash
    base_url: String,
}

impl UrlBuilder {
    /// Creates a builder for the given CDN endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Renders `<base>/<id>-<W>x<H>.<ext>?<query>`.
    ///
    /// The path extension is the requested output format when present,
    /// otherwise the asset's source format. Query parameters appear in the
    /// same fixed order as the cache key fields; an empty option set
    /// renders no query string at all.
    pub fn build(&self, asset: &AssetRef, opts: &TransformOptions) -> String {
        let ext = opts.format.unwrap_or(asset.format);
        let mut url = format!(
            "{}/{}-{}x{}.{}",
            self.base_url, asset.id, asset.width, asset.height, ext.as_str()
        );

        let mut params: Vec<String> = Vec::new();
        if let Some(w) = opts.width {
            params.push(format!("w={}", w));
        }
        if let Some(h) = opts.height {
            params.push(format!("h={}", h));
        }
        if let Some(q) = opts.quality {
            params.push(format!("q={}", q));
        }
        if let Some(f) = opts.format {
            params.push(format!("fm={}", f.as_str()));
        }
        if let Some(fit) = opts.fit {
            params.push(format!("fit={}", fit.as_str()));
        }
        if let Some(d) = opts.dpr {
            params.push(format!("dpr={}", d));
        }
        if let Some(b) = opts.blur {
            params.push(format!("blur={}", b));
        }
        if opts.auto_format {
            params.push("auto=format".to_string());
        }

        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        url
    }
}
