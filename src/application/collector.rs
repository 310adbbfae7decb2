//! Collects mesh topology facts from every configured control plane and
//! merges them into one consistent snapshot.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::domain::errors::{MeshError, MeshResult};
use crate::domain::models::{
    CanaryUpgradeStatus, ClusterDescriptor, Fetched, IstiodResourceThresholds, MeshInfo,
    OutboundTrafficPolicy,
};
use crate::domain::ports::{ClusterClientError, ControlPlaneClient};

/// Fans out independent queries to each cluster's control plane and merges
/// the answers.
///
/// Per-cluster failures are tolerated: an unreachable cluster still appears
/// in the result, marked `accessible: false`, because omitting it would be
/// indistinguishable from "no such cluster". Singleton facts come from the
/// home cluster alone; if its query fails the field is `Failed`, never a
/// partially merged guess.
pub struct ClusterInfoCollector {
    clients: Vec<Arc<dyn ControlPlaneClient>>,
}

impl ClusterInfoCollector {
    pub fn new(clients: Vec<Arc<dyn ControlPlaneClient>>) -> Self {
        Self { clients }
    }

    fn home_client(&self) -> Option<Arc<dyn ControlPlaneClient>> {
        self.clients.iter().find(|c| c.is_home()).cloned()
    }

    /// Identity of every known cluster.
    ///
    /// Escalates to `Unavailable` only when every cluster failed to
    /// answer; an empty mesh is a valid (empty) result, not an error.
    pub async fn clusters(&self) -> MeshResult<Vec<ClusterDescriptor>> {
        let descriptors = self.fetch_descriptors().await;
        if !descriptors.is_empty() && descriptors.iter().all(|d| !d.accessible) {
            return Err(MeshError::Unavailable(
                "no cluster control plane could be reached".to_string(),
            ));
        }
        Ok(descriptors)
    }

    /// One full mesh snapshot: all four query types, fanned out
    /// concurrently and joined before the merge.
    pub async fn collect(&self) -> MeshResult<MeshInfo> {
        let (clusters, outbound_traffic_policy, resource_thresholds, canary_upgrade_status) = tokio::join!(
            self.fetch_descriptors(),
            self.fetch_singleton("outbound-traffic-policy", |c| async move {
                c.outbound_traffic_policy().await
            }),
            self.fetch_singleton("resource-thresholds", |c| async move {
                c.resource_thresholds().await
            }),
            self.fetch_singleton("canary-status", |c| async move {
                c.canary_upgrade_status().await
            }),
        );

        if !clusters.is_empty() && clusters.iter().all(|d| !d.accessible) {
            return Err(MeshError::Unavailable(
                "no cluster control plane could be reached".to_string(),
            ));
        }

        debug!(clusters = clusters.len(), "mesh snapshot collected");
        Ok(MeshInfo {
            clusters,
            outbound_traffic_policy,
            resource_thresholds,
            canary_upgrade_status,
            collected_at: Utc::now(),
        })
    }

    pub async fn outbound_traffic_policy(&self) -> Fetched<OutboundTrafficPolicy> {
        self.fetch_singleton("outbound-traffic-policy", |c| async move {
            c.outbound_traffic_policy().await
        })
        .await
    }

    pub async fn resource_thresholds(&self) -> Fetched<IstiodResourceThresholds> {
        self.fetch_singleton("resource-thresholds", |c| async move {
            c.resource_thresholds().await
        })
        .await
    }

    pub async fn canary_upgrade_status(&self) -> Fetched<CanaryUpgradeStatus> {
        self.fetch_singleton("canary-status", |c| async move {
            c.canary_upgrade_status().await
        })
        .await
    }

    /// One identity query per cluster, run as independent workers and
    /// joined. A failed cluster keeps its configured identity with
    /// `accessible: false`. The result is sorted by name because the merge
    /// must not depend on which cluster answered first.
    async fn fetch_descriptors(&self) -> Vec<ClusterDescriptor> {
        let mut workers: JoinSet<ClusterDescriptor> = JoinSet::new();
        for client in &self.clients {
            let client = Arc::clone(client);
            workers.spawn(async move {
                match client.cluster_descriptor().await {
                    Ok(descriptor) => descriptor,
                    Err(err) => {
                        let endpoint = client.endpoint();
                        warn!(cluster = %endpoint.name, error = %err, "cluster identity query failed");
                        ClusterDescriptor::unreachable(endpoint.name.clone(), client.is_home())
                    }
                }
            });
        }

        let mut descriptors = Vec::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(err) => warn!(error = %err, "cluster identity worker failed"),
            }
        }
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Query one singleton fact from the home cluster.
    ///
    /// Only the home cluster's answer is authoritative, so the query is
    /// issued there alone: no home cluster configured means `Absent`, a
    /// failed query means `Failed` with the reason recorded.
    async fn fetch_singleton<T, F, Fut>(&self, query: &str, run: F) -> Fetched<T>
    where
        F: FnOnce(Arc<dyn ControlPlaneClient>) -> Fut,
        Fut: Future<Output = Result<Option<T>, ClusterClientError>>,
    {
        let Some(home) = self.home_client() else {
            return Fetched::Absent;
        };

        let cluster = home.endpoint().name.clone();
        match run(home).await {
            Ok(Some(value)) => Fetched::Value { value },
            Ok(None) => Fetched::Absent,
            Err(err) => {
                warn!(cluster = %cluster, query, error = %err, "singleton mesh query failed");
                Fetched::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}
