//! HTTP admin surface: Prometheus metrics and the advertised API table.

use crate::error::{Result, TidewireError};
use crate::observability::observability;
use crate::protocol::{supported_apis, ApiDescriptor};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;

pub async fn run_admin_api(addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    run_admin_api_on_listener(listener).await
}

pub async fn run_admin_api_on_listener(listener: TcpListener) -> Result<()> {
    tracing::info!("tidewire admin API listening on {}", listener.local_addr()?);
    let app = Router::new()
        .route("/metrics", get(metrics))
        .route("/api-versions", get(api_versions));

    axum::serve(listener, app)
        .await
        .map_err(TidewireError::Io)
}

async fn metrics() -> String {
    observability().render_prometheus()
}

async fn api_versions() -> Json<&'static [ApiDescriptor]> {
    Json(supported_apis())
}
