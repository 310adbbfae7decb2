//! Mesh topology facts collected from the control planes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of one cluster / control plane in the mesh.
///
/// `accessible: false` marks a cluster that exists in the configuration but
/// failed to answer, distinct from a cluster that answered with nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterDescriptor {
    pub name: String,
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub api_endpoint: String,
    pub is_home_cluster: bool,
    pub accessible: bool,
}

impl ClusterDescriptor {
    /// Descriptor for a cluster that did not respond, built from its
    /// configured identity alone.
    pub fn unreachable(name: impl Into<String>, is_home_cluster: bool) -> Self {
        Self {
            name: name.into(),
            network: String::new(),
            api_endpoint: String::new(),
            is_home_cluster,
            accessible: false,
        }
    }
}

/// Mesh-wide policy for traffic to destinations outside the service registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundTrafficPolicyMode {
    RegistryOnly,
    AllowAny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundTrafficPolicy {
    pub mode: OutboundTrafficPolicyMode,
}

/// Configured limits used to flag control-plane resource exhaustion risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IstiodResourceThresholds {
    pub memory: f64,
    pub cpu: f64,
}

/// State of a canary control-plane upgrade: which namespaces have moved to
/// the new revision and which are still pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanaryUpgradeStatus {
    pub current_version: String,
    pub upgrade_version: String,
    #[serde(default)]
    pub migrated_namespaces: Vec<String>,
    #[serde(default)]
    pub pending_namespaces: Vec<String>,
}

/// Outcome of a singleton mesh-info query.
///
/// `Absent` means the control plane answered and the feature is not
/// present; `Failed` means the query itself did not succeed. The two
/// states are never collapsed, and a failure always records its reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Fetched<T> {
    Value { value: T },
    Absent,
    Failed { reason: String },
}

impl<T> Fetched<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Fetched::Value { value } => Some(value),
            _ => None,
        }
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Fetched::Failed { .. })
    }
}

/// One consistent snapshot of the whole mesh. Constructed fresh per
/// request; never cached by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshInfo {
    /// All known clusters, sorted by name; unreachable ones are kept with
    /// `accessible: false`.
    pub clusters: Vec<ClusterDescriptor>,
    pub outbound_traffic_policy: Fetched<OutboundTrafficPolicy>,
    pub resource_thresholds: Fetched<IstiodResourceThresholds>,
    pub canary_upgrade_status: Fetched<CanaryUpgradeStatus>,
    pub collected_at: DateTime<Utc>,
}
