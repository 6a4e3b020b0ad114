//! # HTTP Server
//!
//! Composes the gateway: shared state wiring, CORS, tracing, body
//! limits, and the combined router.
//!
//! Collaborators are constructed once at startup and injected into
//! components; nothing does ambient singleton lookup from inside
//! business logic.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Duration;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth_routes::auth_routes;
use super::config::GatewayConfig;
use super::object_routes::object_routes;
use super::storage_routes::storage_routes;
use crate::auth::crypto::PasswordPolicy;
use crate::auth::token::{TokenConfig, TokenService};
use crate::auth::user::{InMemoryUserStore, UserStore};
use crate::auth::{CredentialVault, IdentityResolver};
use crate::storage::backend::ObjectStore;
use crate::storage::{LocalStore, NamespacedStore, ShareLinkIssuer};

/// Shared gateway state: the composed access-control components
pub struct GatewayState {
    pub vault: CredentialVault,
    pub tokens: TokenService,
    pub resolver: IdentityResolver,
    pub store: NamespacedStore,
    pub shares: ShareLinkIssuer,
}

impl GatewayState {
    /// Wire the components over the given collaborators
    pub fn new(
        users: Arc<dyn UserStore>,
        objects: Arc<dyn ObjectStore>,
        config: &GatewayConfig,
    ) -> Self {
        let tokens = TokenService::new(TokenConfig {
            secret: config.token_secret.clone(),
            ttl: Duration::seconds(config.token_ttl_secs),
            issuer: "cubby".to_string(),
        });

        Self {
            vault: CredentialVault::new(users.clone(), PasswordPolicy::default()),
            resolver: IdentityResolver::new(tokens.clone(), users),
            store: NamespacedStore::new(objects.clone(), config.max_upload_bytes),
            shares: ShareLinkIssuer::new(objects, Duration::seconds(config.share_ttl_secs)),
            tokens,
        }
    }
}

/// HTTP server for the cubby gateway
pub struct HttpServer {
    config: GatewayConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new server with default configuration
    pub fn new() -> Self {
        Self::with_config(GatewayConfig::default())
    }

    /// Create a new server with custom configuration
    pub fn with_config(config: GatewayConfig) -> Self {
        let router = Self::build_router(&config);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &GatewayConfig) -> Router {
        let objects = Arc::new(LocalStore::new(
            config.data_dir.clone(),
            config.base_url(),
            config.url_signing_secret.as_bytes(),
        ));
        let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        let state = Arc::new(GatewayState::new(users, objects.clone(), config));

        let cors = if config.cors_origins.is_empty() {
            // Permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        // Body limit slightly above the store's own cap, so near-limit
        // uploads get the 413 with detail instead of a framework reject
        let body_limit = (config.max_upload_bytes as usize).saturating_add(64 * 1024);

        Router::new()
            .merge(health_routes())
            .merge(auth_routes(state.clone()))
            .merge(storage_routes(state))
            .merge(object_routes(objects))
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address: {}", e),
            )
        })?;

        tracing::info!(%addr, data_dir = %self.config.data_dir.display(), "starting cubby gateway");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
