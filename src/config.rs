//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cached entries
    pub max_entries: usize,
    /// Approximate byte budget for the cache
    pub max_memory_bytes: usize,
    /// Seconds after which a cached entry is treated as absent
    pub entry_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background expiry-sweep interval in seconds
    pub cleanup_interval: u64,
    /// CDN endpoint the URL builder renders against
    pub cdn_base_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cached entries (default: 500)
    /// - `MAX_MEMORY_BYTES` - Cache byte budget (default: 52428800, 50 MiB)
    /// - `ENTRY_TTL` - Expiry window in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `CDN_BASE_URL` - CDN endpoint (default: https://cdn.images.example.com)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            max_memory_bytes: env::var("MAX_MEMORY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50 * 1024 * 1024),
            entry_ttl: env::var("ENTRY_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            cdn_base_url: env::var("CDN_BASE_URL")
                .unwrap_or_else(|_| "https://cdn.images.example.com".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 500,
            max_memory_bytes: 50 * 1024 * 1024,
            entry_ttl: 3600,
            server_port: 3000,
            cleanup_interval: 60,
            cdn_base_url: "https://cdn.images.example.com".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 500);
        assert_eq!(config.max_memory_bytes, 50 * 1024 * 1024);
        assert_eq!(config.entry_ttl, 3600);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.cdn_base_url, "https://cdn.images.example.com");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("MAX_ENTRIES");
        env::remove_var("MAX_MEMORY_BYTES");
        env::remove_var("ENTRY_TTL");
        env::remove_var("SERVER_PORT");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("CDN_BASE_URL");

        let config = Config::from_env();
        assert_eq!(config.max_entries, 500);
        assert_eq!(config.max_memory_bytes, 50 * 1024 * 1024);
        assert_eq!(config.entry_ttl, 3600);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.cdn_base_url, "https://cdn.images.example.com");
    }
}
