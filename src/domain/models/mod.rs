pub mod config;
pub mod mesh;
pub mod principal;
pub mod resource;
pub mod severity;
pub mod validation;

pub use config::{AggregatorConfig, ClusterEndpoint, Config, LoggingConfig, ServerConfig};
pub use mesh::{
    CanaryUpgradeStatus, ClusterDescriptor, Fetched, IstiodResourceThresholds, MeshInfo,
    OutboundTrafficPolicy, OutboundTrafficPolicyMode,
};
pub use principal::Principal;
pub use resource::{ContainerView, PodView, ResourceKind, ResourceView, ServicePortView, ServiceView};
pub use severity::Severity;
pub use validation::{
    CheckOutcome, Finding, ResourceEntry, ResourceId, ValidationReport, RULE_FAULT_CODE,
};
