//! API Module
//!
//! HTTP handlers and routing for the URL service REST API.
//!
//! # Endpoints
//! - `GET /image/:asset` - Build (or recall) a CDN URL
//! - `GET /srcset/:asset` - Build (or recall) a responsive candidate set
//! - `DELETE /cache/:key` - Purge one memoized entry
//! - `DELETE /cache` - Drop every memoized entry
//! - `GET /stats` - Cache snapshot
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
