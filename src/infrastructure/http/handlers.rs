//! HTTP handlers for the mesh API. Thin by design: extract, delegate to
//! the facade, map the error.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use super::error::ApiError;
use crate::application::MeshService;
use crate::domain::models::{
    CanaryUpgradeStatus, ClusterDescriptor, Fetched, IstiodResourceThresholds, MeshInfo,
    OutboundTrafficPolicy, Principal, ResourceEntry, ValidationReport,
};

/// Header the surrounding deployment uses to assert the caller identity.
const PRINCIPAL_HEADER: &str = "x-forwarded-user";

pub type ApiState = Arc<MeshService>;

fn principal_from(headers: &HeaderMap) -> Principal {
    headers
        .get(PRINCIPAL_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(Principal::anonymous, Principal::new)
}

pub async fn get_clusters(
    State(service): State<ApiState>,
) -> Result<Json<Vec<ClusterDescriptor>>, ApiError> {
    Ok(Json(service.get_clusters().await?))
}

pub async fn get_mesh(
    State(service): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<MeshInfo>, ApiError> {
    let principal = principal_from(&headers);
    Ok(Json(service.get_mesh(&principal).await?))
}

pub async fn outbound_traffic_policy(
    State(service): State<ApiState>,
) -> Result<Json<Fetched<OutboundTrafficPolicy>>, ApiError> {
    Ok(Json(service.outbound_traffic_policy().await?))
}

pub async fn resource_thresholds(
    State(service): State<ApiState>,
) -> Result<Json<Fetched<IstiodResourceThresholds>>, ApiError> {
    Ok(Json(service.resource_thresholds().await?))
}

pub async fn canary_status(
    State(service): State<ApiState>,
) -> Result<Json<Fetched<CanaryUpgradeStatus>>, ApiError> {
    Ok(Json(service.canary_status().await?))
}

pub async fn validate(
    State(service): State<ApiState>,
    Json(entries): Json<Vec<ResourceEntry>>,
) -> Json<ValidationReport> {
    Json(service.validate(entries).await)
}
