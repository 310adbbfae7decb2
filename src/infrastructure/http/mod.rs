//! HTTP API surface over the mesh facade.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::MeshService;

/// Build the API router.
pub fn router(service: Arc<MeshService>) -> Router {
    Router::new()
        .route("/api/clusters", get(handlers::get_clusters))
        .route("/api/mesh", get(handlers::get_mesh))
        .route(
            "/api/mesh/outbound-traffic-policy",
            get(handlers::outbound_traffic_policy),
        )
        .route(
            "/api/mesh/resource-thresholds",
            get(handlers::resource_thresholds),
        )
        .route("/api/mesh/canary-status", get(handlers::canary_status))
        .route("/api/validate", post(handlers::validate))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve the API until the process is stopped.
pub async fn serve(service: Arc<MeshService>, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "mesh API listening");
    axum::serve(listener, router(service)).await?;
    Ok(())
}
