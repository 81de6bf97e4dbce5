// SPDX-License-Identifier: MIT OR Apache-2.0
//! QR Factorization Server
//!
//! This crate provides an authenticated HTTP service that validates a
//! numeric matrix, computes its economic QR factorization, and forwards the
//! factors to a downstream statistics service. It supports:
//!
//! - Matrix validation with descriptive shape errors
//! - Economic (reduced) QR factorization via a dense Householder QR
//! - HMAC-signed bearer token login with a 24-hour expiry
//! - Best-effort statistics proxying that degrades gracefully
//!
//! # Example
//!
//! ```ignore
//! use qr_server::{QrServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     QrServer::new(config).serve().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rustdoc::broken_intra_doc_links
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::future_not_send)]
#![allow(clippy::cast_precision_loss)]

pub mod auth;
pub mod config;
pub mod error;
pub mod matrix;
pub mod rest;
pub mod stats;

use std::sync::Arc;

pub use auth::{Claims, TOKEN_TTL_SECS};
pub use config::{AdminCredentials, ServerConfig};
pub use error::{Result, ServerError};
pub use matrix::Matrix;
pub use rest::{ApiContext, ApiError, SERVICE_NAME};
pub use stats::{StatisticsClient, StatisticsResponse};

/// The QR factorization HTTP server.
pub struct QrServer {
    config: ServerConfig,
}

impl QrServer {
    /// Create a new server from a configuration.
    #[must_use]
    pub const fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Serve the REST API until a shutdown signal is received.
    ///
    /// # Errors
    ///
    /// Returns an error if the outbound client cannot be constructed, the
    /// listener cannot bind, or serving fails.
    pub async fn serve(self) -> Result<()> {
        let bind_addr = self.config.bind_addr;
        let ctx = Arc::new(ApiContext::new(self.config)?);
        let app = rest::router(ctx);

        let listener = tokio::net::TcpListener::bind(bind_addr).await?;
        tracing::info!("Listening on {bind_addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
