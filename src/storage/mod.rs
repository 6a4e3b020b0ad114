//! # cubby Storage Module
//!
//! Namespaced object storage over a pluggable backend, plus signed
//! share-link issuance. Every key lives under exactly one principal's
//! prefix; the prefix is derived server-side, never trusted from the
//! client.

pub mod backend;
pub mod errors;
pub mod local;
pub mod namespace;
pub mod namespaced;
pub mod object;
pub mod share;
pub mod signed_url;

pub use backend::{ObjectStore, SignedDownload};
pub use errors::{StorageError, StorageResult};
pub use local::LocalStore;
pub use namespaced::NamespacedStore;
pub use object::StoredObject;
pub use share::{ShareGrant, ShareLinkIssuer};
pub use signed_url::SignedUrlGenerator;
