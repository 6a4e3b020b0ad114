//! Gateway Configuration
//!
//! Defaults overridable from the environment (`CUBBY_*`). Secrets fall
//! back to fresh random values, so an unconfigured instance works but
//! invalidates tokens and links on restart.

use std::path::PathBuf;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 4000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means permissive (development)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Secret for signing session tokens
    #[serde(default = "random_secret")]
    pub token_secret: String,

    /// Secret for signing object URLs
    #[serde(default = "random_secret")]
    pub url_signing_secret: String,

    /// Session token lifetime in seconds (default: 3600)
    #[serde(default = "default_ttl_secs")]
    pub token_ttl_secs: i64,

    /// Share link lifetime in seconds (default: 3600)
    #[serde(default = "default_ttl_secs")]
    pub share_ttl_secs: i64,

    /// Maximum accepted upload size in bytes (default: 50 MiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Root directory for the local object store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Externally visible base URL, if different from host:port
    #[serde(default)]
    pub public_base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_ttl_secs() -> i64 {
    3600
}

fn default_max_upload_bytes() -> u64 {
    50 * 1024 * 1024
}

fn default_data_dir() -> PathBuf {
    std::env::temp_dir().join("cubby_objects")
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            token_secret: random_secret(),
            url_signing_secret: random_secret(),
            token_ttl_secs: default_ttl_secs(),
            share_ttl_secs: default_ttl_secs(),
            max_upload_bytes: default_max_upload_bytes(),
            data_dir: default_data_dir(),
            public_base_url: None,
        }
    }
}

impl GatewayConfig {
    /// Build a config from defaults plus `CUBBY_*` environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("CUBBY_HOST") {
            config.host = v;
        }
        if let Ok(v) = std::env::var("CUBBY_PORT") {
            if let Ok(port) = v.parse() {
                config.port = port;
            }
        }
        if let Ok(v) = std::env::var("CUBBY_CORS_ORIGINS") {
            config.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = std::env::var("CUBBY_TOKEN_SECRET") {
            config.token_secret = v;
        }
        if let Ok(v) = std::env::var("CUBBY_URL_SECRET") {
            config.url_signing_secret = v;
        }
        if let Ok(v) = std::env::var("CUBBY_MAX_UPLOAD_BYTES") {
            if let Ok(bytes) = v.parse() {
                config.max_upload_bytes = bytes;
            }
        }
        if let Ok(v) = std::env::var("CUBBY_DATA_DIR") {
            config.data_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("CUBBY_PUBLIC_URL") {
            config.public_base_url = Some(v);
        }

        config
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL used when rendering object and share URLs
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.public_base_url {
            return url.trim_end_matches('/').to_string();
        }

        let host = if self.host == "0.0.0.0" {
            "localhost"
        } else {
            &self.host
        };
        format!("http://{}:{}", host, self.port)
    }
}
