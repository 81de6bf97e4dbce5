// SPDX-License-Identifier: MIT OR Apache-2.0
//! QR factorization server binary entry point.

use qr_server::{QrServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qr_server=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    // Load configuration from environment or defaults
    let config = ServerConfig::from_env()?;

    tracing::info!("Starting QR server on {}", config.bind_addr);

    QrServer::new(config).serve().await?;

    Ok(())
}
