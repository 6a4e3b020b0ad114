//! Auth HTTP Routes
//!
//! Registration and login. Both respond with a session token; every
//! other route expects it back as `Authorization: Bearer <token>`.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

use super::response::{auth_error, ApiError};
use super::server::GatewayState;

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Create auth routes
pub fn auth_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .with_state(state)
}

/// Register handler
async fn register_handler(
    State(state): State<Arc<GatewayState>>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let user = state
        .vault
        .register(&request.username, &request.password)
        .await
        .map_err(auth_error)?;

    let token = state.tokens.issue(user.id).map_err(auth_error)?;
    tracing::info!(username = %user.username, "user registered");

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Login handler
async fn login_handler(
    State(state): State<Arc<GatewayState>>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .vault
        .verify(&request.username, &request.password)
        .await
        .map_err(auth_error)?;

    let token = state.tokens.issue(user.id).map_err(auth_error)?;
    tracing::debug!(username = %user.username, "user logged in");

    Ok(Json(TokenResponse { token }))
}
