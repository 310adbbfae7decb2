use async_trait::async_trait;

use super::errors::ClusterClientError;
use crate::domain::models::{
    CanaryUpgradeStatus, ClusterDescriptor, ClusterEndpoint, IstiodResourceThresholds,
    OutboundTrafficPolicy,
};

/// Port over one cluster's control plane.
///
/// The four queries are logically distinct and may be answered by
/// different control-plane components; the collector issues them
/// independently so that the failure of one never blocks the others.
/// `Ok(None)` from a singleton query means the control plane answered and
/// the feature is not present, which is not a failure.
#[async_trait]
pub trait ControlPlaneClient: Send + Sync {
    /// Configured identity of this endpoint, available even when the
    /// cluster is unreachable.
    fn endpoint(&self) -> &ClusterEndpoint;

    /// Whether this endpoint is the home cluster's control plane.
    fn is_home(&self) -> bool;

    /// Live cluster identity as reported by the control plane.
    async fn cluster_descriptor(&self) -> Result<ClusterDescriptor, ClusterClientError>;

    async fn outbound_traffic_policy(
        &self,
    ) -> Result<Option<OutboundTrafficPolicy>, ClusterClientError>;

    async fn resource_thresholds(
        &self,
    ) -> Result<Option<IstiodResourceThresholds>, ClusterClientError>;

    async fn canary_upgrade_status(
        &self,
    ) -> Result<Option<CanaryUpgradeStatus>, ClusterClientError>;
}
