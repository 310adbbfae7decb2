//! Read-only resource snapshots consumed by checkers.
//!
//! A `ResourceView` is the slice of orchestrator state a checker needs to
//! inspect one object. Views are immutable once constructed; checkers only
//! ever borrow them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kinds of resources the checker framework knows how to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Pod,
    Service,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Pod => f.write_str("Pod"),
            ResourceKind::Service => f.write_str("Service"),
        }
    }
}

/// One container inside a Pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerView {
    pub name: String,
    pub image: String,
}

/// Snapshot of a Pod: its containers and annotations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PodView {
    #[serde(default)]
    pub containers: Vec<ContainerView>,
    /// Pod annotations, ordered for reproducible serialization.
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

/// One port exposed by a Service. Unnamed ports are legal; the mesh then
/// infers the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePortView {
    #[serde(default)]
    pub name: Option<String>,
    pub port: u16,
}

/// Snapshot of a Service: its declared ports.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceView {
    #[serde(default)]
    pub ports: Vec<ServicePortView>,
}

/// Polymorphic resource snapshot, tagged by kind on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ResourceView {
    Pod(PodView),
    Service(ServiceView),
}

impl ResourceView {
    pub const fn kind(&self) -> ResourceKind {
        match self {
            ResourceView::Pod(_) => ResourceKind::Pod,
            ResourceView::Service(_) => ResourceKind::Service,
        }
    }
}
