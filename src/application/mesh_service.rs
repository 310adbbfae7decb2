//! Facade over the collector and the aggregator, consumed by the API
//! boundary.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::aggregator::Aggregator;
use crate::application::collector::ClusterInfoCollector;
use crate::domain::errors::{MeshError, MeshResult};
use crate::domain::models::{
    CanaryUpgradeStatus, ClusterDescriptor, Config, Fetched, IstiodResourceThresholds, MeshInfo,
    OutboundTrafficPolicy, Principal, ResourceEntry, ValidationReport,
};
use crate::domain::ports::NamespaceAccess;

/// Entry point for every mesh operation.
///
/// Construction wires in the configuration explicitly; nothing here reads
/// process-global state.
pub struct MeshService {
    config: Arc<Config>,
    collector: ClusterInfoCollector,
    aggregator: Aggregator,
    access: Arc<dyn NamespaceAccess>,
}

impl MeshService {
    pub fn new(
        config: Arc<Config>,
        collector: ClusterInfoCollector,
        aggregator: Aggregator,
        access: Arc<dyn NamespaceAccess>,
    ) -> Self {
        Self {
            config,
            collector,
            aggregator,
            access,
        }
    }

    /// Full mesh snapshot, gated on read access to the control-plane
    /// namespace on the home cluster. On denial the collector is never
    /// invoked.
    #[instrument(skip(self), fields(principal = %principal))]
    pub async fn get_mesh(&self, principal: &Principal) -> MeshResult<MeshInfo> {
        self.check_access(principal).await?;
        self.collector.collect().await
    }

    pub async fn get_clusters(&self) -> MeshResult<Vec<ClusterDescriptor>> {
        self.collector.clusters().await
    }

    pub async fn outbound_traffic_policy(&self) -> MeshResult<Fetched<OutboundTrafficPolicy>> {
        Ok(self.collector.outbound_traffic_policy().await)
    }

    pub async fn resource_thresholds(&self) -> MeshResult<Fetched<IstiodResourceThresholds>> {
        Ok(self.collector.resource_thresholds().await)
    }

    pub async fn canary_status(&self) -> MeshResult<Fetched<CanaryUpgradeStatus>> {
        Ok(self.collector.canary_upgrade_status().await)
    }

    /// Run the checker framework over the submitted resources. Rule faults
    /// surface as findings inside the report, never as an error here.
    pub async fn validate(&self, entries: Vec<ResourceEntry>) -> ValidationReport {
        let resources = entries.into_iter().map(ResourceEntry::into_pair).collect();
        self.aggregator.validate(resources).await
    }

    /// The access gate. A failing access query denies: access that cannot
    /// be proven is access the caller does not have.
    async fn check_access(&self, principal: &Principal) -> MeshResult<()> {
        let namespace = &self.config.control_plane_namespace;
        let cluster = &self.config.home_cluster;

        let allowed = self
            .access
            .can_read(principal, namespace, cluster)
            .await
            .map_err(|err| MeshError::AccessDenied {
                namespace: namespace.clone(),
                cluster: cluster.clone(),
                reason: err.to_string(),
            })?;

        if allowed {
            Ok(())
        } else {
            info!(principal = %principal, namespace = %namespace, "mesh access denied");
            Err(MeshError::AccessDenied {
                namespace: namespace.clone(),
                cluster: cluster.clone(),
                reason: format!("principal '{principal}' cannot read the namespace"),
            })
        }
    }
}
