//! # cubby HTTP Gateway
//!
//! The composed request boundary: axum routers for registration,
//! login, upload, listing, and share-link issuance, plus the local
//! backend's signed-object endpoint.
//!
//! # Endpoints
//!
//! - `POST /register`, `POST /login` - credential flows
//! - `POST /upload`, `GET /files` - namespaced storage (bearer token)
//! - `GET /share/:username/:filename` - share-link issuance (bearer token)
//! - `GET /objects/*key` - signed direct download (local backend only)
//! - `GET /health` - health check

pub mod auth_routes;
pub mod config;
pub mod object_routes;
pub mod response;
pub mod server;
pub mod storage_routes;

pub use config::GatewayConfig;
pub use server::{GatewayState, HttpServer};
