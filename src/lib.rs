//! cubby - a self-hostable multi-tenant file storage gateway
//!
//! Authenticates users, stores their files under per-user namespaces in
//! a shared object-storage backend, and issues time-limited signed
//! share links.

pub mod auth;
pub mod cli;
pub mod http_server;
pub mod storage;
