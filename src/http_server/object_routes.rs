//! Signed Object Routes
//!
//! The local backend's direct-access endpoint: serves object bytes to
//! holders of a valid signed URL. No session auth here - the signed
//! token is the authorization, checked before any read.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Router,
};
use serde::Deserialize;

use super::response::{storage_error, ApiError};
use crate::storage::LocalStore;

#[derive(Debug, Deserialize)]
pub struct SignedQuery {
    pub token: String,
    pub expires: i64,
}

/// Create the signed-download route backed by the local store
pub fn object_routes(store: Arc<LocalStore>) -> Router {
    Router::new()
        .route("/objects/*key", get(download_handler))
        .with_state(store)
}

/// Serve one object after verifying its signed token
async fn download_handler(
    State(store): State<Arc<LocalStore>>,
    Path(key): Path<String>,
    Query(query): Query<SignedQuery>,
) -> Result<(StatusCode, HeaderMap, Bytes), ApiError> {
    store
        .verify_token(&key, query.expires, &query.token)
        .map_err(storage_error)?;

    let (object, data) = store.get(&key).await.map_err(storage_error)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        object
            .content_type
            .parse()
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );

    Ok((StatusCode::OK, headers, Bytes::from(data)))
}
