// SPDX-License-Identifier: MIT OR Apache-2.0
//! REST API for the QR factorization service.
//!
//! Exposes an unauthenticated health check, a login endpoint issuing bearer
//! tokens, and a token-protected factorization endpoint.

use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::stats::StatisticsClient;

pub mod error;
pub mod login;
pub mod matrix;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use types::*;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "qr-server";

/// Context shared across REST handlers.
#[derive(Debug)]
pub struct ApiContext {
    /// Server configuration.
    pub config: ServerConfig,
    /// Client for the downstream statistics service.
    pub stats: StatisticsClient,
}

impl ApiContext {
    /// Create a new context from a server configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the outbound HTTP client cannot be constructed.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let stats = StatisticsClient::new(config.node_api_url.clone(), config.stats_timeout)?;
        Ok(Self { config, stats })
    }
}

/// Create the REST API router.
pub fn router(ctx: Arc<ApiContext>) -> Router {
    let mut router = Router::new()
        .route("/health", get(matrix::health))
        .route("/api/v1/login", post(login::login))
        .route("/api/v1/matrix/qr", post(matrix::factorize))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(ctx.config.max_body_size));

    if !ctx.config.cors_origins.is_empty() {
        let origins: Vec<HeaderValue> = ctx
            .config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        router = router.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([CONTENT_TYPE, AUTHORIZATION]),
        );
    }

    router.with_state(ctx)
}
