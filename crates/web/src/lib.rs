//! Outcome demo web server
//!
//! Serves one user lookup in two styles (`?` early return and `Outcome`
//! combinators) behind tower middleware for CORS, tracing, and compression.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

use axum::{Router, http::Method, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod error;
pub mod routes;
pub mod server;
pub mod users;

pub use error::{AppError, ErrorResponse};
pub use routes::AppState;
pub use users::{FailureInfo, User, UserDirectory};

/// Environment variable overriding [`ServerConfig::bind_address`].
pub const BIND_ENV: &str = "OUTCOME_WEB_BIND";
/// Environment variable overriding [`ServerConfig::cors_origin`].
pub const CORS_ORIGIN_ENV: &str = "OUTCOME_WEB_CORS_ORIGIN";

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to (e.g., "127.0.0.1:3000")
    pub bind_address: String,
    /// Allowed CORS origin (e.g., "http://localhost:3000")
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:3000".to_string(),
        }
    }
}

impl ServerConfig {
    /// Defaults, overridden by `OUTCOME_WEB_BIND` / `OUTCOME_WEB_CORS_ORIGIN`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each variable.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_address: lookup(BIND_ENV).unwrap_or(defaults.bind_address),
            cors_origin: lookup(CORS_ORIGIN_ENV).unwrap_or(defaults.cors_origin),
        }
    }
}

/// Create a new router with middleware, serving the seeded user directory.
///
/// # Errors
///
/// Returns an error if the CORS origin is not a valid header value.
pub fn create_router(config: &ServerConfig) -> Result<Router, Error> {
    create_router_with(config, UserDirectory::seeded())
}

/// Create a new router with middleware over the given directory.
///
/// # Errors
///
/// Returns an error if the CORS origin is not a valid header value.
pub fn create_router_with(config: &ServerConfig, directory: UserDirectory) -> Result<Router, Error> {
    info!("Creating router with CORS origin: {}", config.cors_origin);

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<::axum::http::HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let router = routes::create_router()
        .route("/health", get(health_check))
        .with_state(AppState::new(directory))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        );

    Ok(router)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Web server errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid header value
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] ::axum::http::header::InvalidHeaderValue),

    /// Invalid bind address
    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(#[from] std::net::AddrParseError),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] ::axum::http::Error),

    /// Axum error
    #[error("Axum error: {0}")]
    Axum(#[from] axum::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::convert::Infallible> for Error {
    fn from(value: std::convert::Infallible) -> Self {
        match value {}
    }
}
