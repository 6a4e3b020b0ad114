//! HTTP Error Responses
//!
//! Maps domain errors to status codes and client-safe bodies. Detail
//! for collaborator failures stays in the server-side log.

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::auth::AuthError;
use crate::storage::StorageError;

/// Error body returned to clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map an auth error to its HTTP response
pub fn auth_error(err: AuthError) -> ApiError {
    if err.is_client_error() {
        tracing::debug!(error = %err, "request rejected");
    } else {
        tracing::error!(error = %err, "auth collaborator failure");
    }
    respond(err.status_code(), err.public_message())
}

/// Map a storage error to its HTTP response
pub fn storage_error(err: StorageError) -> ApiError {
    if err.is_client_error() {
        tracing::debug!(error = %err, "request rejected");
    } else {
        tracing::error!(error = %err, "storage collaborator failure");
    }
    respond(err.status_code(), err.public_message())
}

fn respond(code: u16, message: String) -> ApiError {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: message,
            code,
        }),
    )
}
