//! Validation result tree: findings, per-resource outcomes, and the
//! mesh-wide report.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::resource::{ResourceKind, ResourceView};
use super::severity::Severity;

/// Reserved finding code for a checker that failed internally.
pub const RULE_FAULT_CODE: &str = "MV0000";

/// A single rule violation (or observation) emitted by a checker.
///
/// Immutable after creation; owned by the report once emitted. `path`
/// locates the offending field inside the checked object and is empty for
/// object-level findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable machine-readable rule code, e.g. `MV0101`.
    pub code: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub path: String,
}

impl Finding {
    pub fn new(
        code: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            path: String::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Synthetic finding standing in for a checker that faulted internally.
    pub fn rule_fault(checker: &str) -> Self {
        Self::new(
            RULE_FAULT_CODE,
            Severity::Error,
            format!("checker '{checker}' failed internally"),
        )
    }
}

/// Identity of one checked resource.
///
/// Ordered by (namespace, kind, name) so reports group resources by
/// namespace and serialize in one canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    pub kind: ResourceKind,
    pub namespace: String,
    pub name: String,
}

impl ResourceId {
    pub fn new(kind: ResourceKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.kind, self.namespace, self.name)
    }
}

impl Ord for ResourceId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace
            .cmp(&other.namespace)
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for ResourceId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of running every applicable checker over one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub resource: ResourceId,
    pub findings: Vec<Finding>,
    pub passed: bool,
}

impl CheckOutcome {
    pub fn worst_severity(&self) -> Severity {
        self.findings
            .iter()
            .map(|f| f.severity)
            .max()
            .unwrap_or(Severity::Info)
    }
}

/// Mesh-wide validation report: one outcome per checked resource plus the
/// worst severity seen anywhere. Read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub outcomes: Vec<CheckOutcome>,
    pub worst_severity: Severity,
}

impl ValidationReport {
    /// Build a report from per-resource outcomes, sorting them into the
    /// canonical order so identical inputs yield byte-identical reports.
    pub fn from_outcomes(mut outcomes: Vec<CheckOutcome>) -> Self {
        outcomes.sort_by(|a, b| a.resource.cmp(&b.resource));
        let worst_severity = outcomes
            .iter()
            .map(CheckOutcome::worst_severity)
            .max()
            .unwrap_or(Severity::Info);
        Self {
            outcomes,
            worst_severity,
        }
    }

    pub fn outcome_for(&self, id: &ResourceId) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| &o.resource == id)
    }
}

/// One entry of a validation request: resource identity plus its snapshot.
/// The kind lives on the view, so identity and view can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub namespace: String,
    pub name: String,
    pub resource: ResourceView,
}

impl ResourceEntry {
    pub fn into_pair(self) -> (ResourceId, ResourceView) {
        let id = ResourceId::new(self.resource.kind(), self.namespace, self.name);
        (id, self.resource)
    }
}
