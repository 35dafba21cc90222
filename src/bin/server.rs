//! Tidewire server binary: runs the Kafka protocol listener.
//!
//! Optional: set TIDEWIRE_ADMIN_ADDR (e.g. 0.0.0.0:9644) to also serve
//! /metrics and /api-versions over HTTP.

use std::sync::Arc;
use tidewire::{admin, server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tidewire=info".parse()?))
        .init();

    let config = Arc::new(ServerConfig::from_env()?);

    if let Some(admin_addr) = config.admin_addr.clone() {
        tokio::spawn(async move {
            if let Err(e) = admin::run_admin_api(&admin_addr).await {
                tracing::error!("admin API on {} failed: {}", admin_addr, e);
            }
        });
    }

    server::run_server(config).await?;
    Ok(())
}
