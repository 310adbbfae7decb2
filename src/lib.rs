//! Meshview - Service Mesh Topology & Validation Engine
//!
//! Meshview answers two questions for a mesh operator: what does the mesh
//! look like across clusters, control planes, and canary revisions, and
//! which deployed resources violate best-practice or correctness rules.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, port contracts, error taxonomy
//! - **Application Layer** (`application`): checker framework, aggregator,
//!   cluster info collector, and the mesh facade
//! - **Infrastructure Layer** (`infrastructure`): config loading, logging,
//!   HTTP API, and control-plane client adapters
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use meshview::application::{Aggregator, CheckRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = Arc::new(CheckRegistry::with_builtin_checks(&config));
//!     let report = Aggregator::new(registry, 8).validate(resources).await;
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use application::{Aggregator, CheckRegistry, CheckVerdict, Checker, ClusterInfoCollector, MeshService};
pub use domain::errors::{MeshError, MeshResult};
pub use domain::models::{
    CanaryUpgradeStatus, CheckOutcome, ClusterDescriptor, Config, Fetched, Finding,
    IstiodResourceThresholds, MeshInfo, OutboundTrafficPolicy, OutboundTrafficPolicyMode, PodView,
    Principal, ResourceEntry, ResourceId, ResourceKind, ResourceView, ServiceView, Severity,
    ValidationReport,
};
pub use domain::ports::{ClusterClientError, ControlPlaneClient, NamespaceAccess};
pub use infrastructure::config::{ConfigError, ConfigLoader};
