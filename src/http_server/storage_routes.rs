//! Storage HTTP Routes
//!
//! Upload, inventory listing, and share-link issuance. Every handler
//! here resolves the bearer token to a principal before touching the
//! store; resolution failure ends the request with an opaque 401.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::response::{auth_error, storage_error, ApiError};
use super::server::GatewayState;
use crate::auth::user::Principal;
use crate::storage::errors::StorageError;
use crate::storage::namespace::{self, validate_filename};
use crate::storage::object::StoredObject;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub content_type: String,
    pub url: String,
}

impl FileResponse {
    fn from_object(object: &StoredObject, url: String) -> Self {
        Self {
            key: object.key.clone(),
            size: object.size,
            last_modified: object.last_modified,
            content_type: object.content_type.clone(),
            url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub download_url: String,
    pub expires_at: DateTime<Utc>,
}

// ==================
// Routes
// ==================

/// Create storage routes (all require a bearer token)
pub fn storage_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/upload", post(upload_handler))
        .route("/files", get(list_files_handler))
        .route("/share/:username/:filename", get(share_handler))
        .with_state(state)
}

/// Resolve the request's bearer token to a principal
async fn authorize(state: &GatewayState, headers: &HeaderMap) -> Result<Principal, ApiError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    state.resolver.resolve(authorization).await.map_err(auth_error)
}

// ==================
// Handlers
// ==================

/// Upload handler: stores the first file field under the caller's namespace
async fn upload_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let principal = authorize(&state, &headers).await?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| storage_error(StorageError::InvalidMultipart(e.to_string())))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| storage_error(StorageError::InvalidMultipart(e.to_string())))?;

        upload = Some((filename, content_type, data));
        break;
    }

    let (filename, content_type, data) = upload.ok_or_else(|| storage_error(StorageError::NoFile))?;

    let object = state
        .store
        .put(&principal, &filename, &data, &content_type)
        .await
        .map_err(storage_error)?;

    tracing::info!(
        username = %principal.username,
        key = %object.key,
        size = object.size,
        "file uploaded"
    );

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        location: state.store.public_url(&object),
    }))
}

/// List handler: the caller's inventory, scoped server-side
async fn list_files_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let principal = authorize(&state, &headers).await?;

    let objects = state.store.list(&principal).await.map_err(storage_error)?;

    let files = objects
        .iter()
        .map(|o| FileResponse::from_object(o, state.store.public_url(o)))
        .collect();

    Ok(Json(files))
}

/// Share handler: issue a signed link for one of the caller's objects
async fn share_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Path((username, filename)): Path<(String, String)>,
) -> Result<Json<ShareResponse>, ApiError> {
    let principal = authorize(&state, &headers).await?;

    if principal.username != username {
        return Err(storage_error(StorageError::Forbidden));
    }

    // axum decodes %2F before matching, so the filename segment can
    // still carry the delimiter; such a key never names a shareable
    // object
    if validate_filename(&filename).is_err() {
        return Err(storage_error(StorageError::Forbidden));
    }

    let key = format!("{}{}", namespace::namespace(&username), filename);
    let grant = state
        .shares
        .issue(&principal, &key)
        .await
        .map_err(storage_error)?;

    tracing::info!(username = %principal.username, key = %grant.key, "share link issued");

    Ok(Json(ShareResponse {
        download_url: grant.download_url,
        expires_at: grant.expires_at,
    }))
}
