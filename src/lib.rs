//! Pixcache - A lightweight image CDN URL service
//!
//! Builds CDN image URLs from asset references and transform options,
//! memoized through a memory-bounded in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod imaging;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
