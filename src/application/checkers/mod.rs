//! Checker framework: polymorphic validation rules and their registry.
//!
//! A checker inspects one resource snapshot and builds findings whenever
//! its rule fails. Checkers are pure: they never mutate the view, never
//! perform IO, and are expected to be total. A panicking checker is
//! isolated by the aggregator, not by the framework.

pub mod port_name;
pub mod sidecar_presence;

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::models::{Config, Finding, ResourceKind, ResourceView};

pub use port_name::PortNameChecker;
pub use sidecar_presence::SidecarPresenceChecker;

/// What one checker concluded about one resource.
///
/// `passed` is checker-defined and not simply "no findings": a rule may
/// require the presence of something and fail without emitting more than a
/// single advisory finding, or emit informational findings while passing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckVerdict {
    pub findings: Vec<Finding>,
    pub passed: bool,
}

impl CheckVerdict {
    pub const fn pass() -> Self {
        Self {
            findings: Vec::new(),
            passed: true,
        }
    }

    pub fn fail_with(finding: Finding) -> Self {
        Self {
            findings: vec![finding],
            passed: false,
        }
    }
}

/// A single validation rule, polymorphic over resource kind.
pub trait Checker: Send + Sync {
    /// Stable rule name, used in logs and synthetic fault findings.
    fn name(&self) -> &'static str;

    fn check(&self, view: &ResourceView) -> CheckVerdict;
}

/// Ordered sets of checkers, keyed by the resource kind they apply to.
///
/// Registration order is execution order is finding order, required for
/// reproducible reports. Lookup for an unregistered kind yields the empty
/// slice, meaning "no applicable rules", which is distinct from "all rules
/// passed".
#[derive(Default)]
pub struct CheckRegistry {
    checkers: HashMap<ResourceKind, Vec<Arc<dyn Checker>>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in rule catalog.
    pub fn with_builtin_checks(config: &Config) -> Self {
        let mut registry = Self::new();
        registry.register(
            ResourceKind::Pod,
            Arc::new(SidecarPresenceChecker::new(&config.sidecar_image)),
        );
        registry.register(ResourceKind::Service, Arc::new(PortNameChecker));
        registry
    }

    pub fn register(&mut self, kind: ResourceKind, checker: Arc<dyn Checker>) {
        self.checkers.entry(kind).or_default().push(checker);
    }

    pub fn checkers_for(&self, kind: ResourceKind) -> &[Arc<dyn Checker>] {
        self.checkers.get(&kind).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Severity;

    struct TaggedChecker(&'static str);

    impl Checker for TaggedChecker {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(&self, _view: &ResourceView) -> CheckVerdict {
            CheckVerdict {
                findings: vec![Finding::new("MV9999", Severity::Info, self.0)],
                passed: true,
            }
        }
    }

    #[test]
    fn lookup_for_unregistered_kind_is_empty_not_an_error() {
        let registry = CheckRegistry::new();
        assert!(registry.checkers_for(ResourceKind::Pod).is_empty());
    }

    #[test]
    fn checkers_run_in_registration_order() {
        let mut registry = CheckRegistry::new();
        registry.register(ResourceKind::Pod, Arc::new(TaggedChecker("first")));
        registry.register(ResourceKind::Pod, Arc::new(TaggedChecker("second")));

        let names: Vec<_> = registry
            .checkers_for(ResourceKind::Pod)
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn builtin_registry_covers_pods_and_services() {
        let registry = CheckRegistry::with_builtin_checks(&Config::default());
        assert_eq!(registry.checkers_for(ResourceKind::Pod).len(), 1);
        assert_eq!(registry.checkers_for(ResourceKind::Service).len(), 1);
    }
}
