//! Integration tests for the validation aggregator: determinism under
//! concurrency, idempotence, and rule isolation.

use std::sync::Arc;

use meshview::application::{Aggregator, CheckRegistry, CheckVerdict, Checker};
use meshview::domain::models::{
    ContainerView, Finding, PodView, ResourceId, ResourceKind, ResourceView, Severity,
    RULE_FAULT_CODE,
};
use meshview::Config;

/// A checker that always faults internally.
struct PanickingChecker;

impl Checker for PanickingChecker {
    fn name(&self) -> &'static str {
        "panicking-checker"
    }

    fn check(&self, _view: &ResourceView) -> CheckVerdict {
        panic!("checker defect");
    }
}

/// A well-behaved checker registered after the faulty one.
struct InfoChecker;

impl Checker for InfoChecker {
    fn name(&self) -> &'static str {
        "info-checker"
    }

    fn check(&self, _view: &ResourceView) -> CheckVerdict {
        CheckVerdict {
            findings: vec![Finding::new("MV9100", Severity::Info, "observed")],
            passed: true,
        }
    }
}

fn pod_resources(count: usize) -> Vec<(ResourceId, ResourceView)> {
    (0..count)
        .map(|i| {
            let sidecar = i % 3 == 0;
            let image = if sidecar {
                "docker.io/istio/proxy:1.21.0"
            } else {
                "registry.local/app:2"
            };
            (
                ResourceId::new(ResourceKind::Pod, format!("ns-{}", i % 7), format!("pod-{i}")),
                ResourceView::Pod(PodView {
                    containers: vec![ContainerView {
                        name: "app".to_string(),
                        image: image.to_string(),
                    }],
                    annotations: Default::default(),
                }),
            )
        })
        .collect()
}

fn builtin_registry() -> Arc<CheckRegistry> {
    Arc::new(CheckRegistry::with_builtin_checks(&Config::default()))
}

#[tokio::test]
async fn validate_is_deterministic_across_worker_counts() {
    let resources = pod_resources(100);

    let parallel = Aggregator::new(builtin_registry(), 4)
        .validate(resources.clone())
        .await;
    let serial = Aggregator::new(builtin_registry(), 1)
        .validate(resources)
        .await;

    let parallel_json = serde_json::to_string(&parallel).unwrap();
    let serial_json = serde_json::to_string(&serial).unwrap();
    assert_eq!(parallel_json, serial_json);
}

#[tokio::test]
async fn validate_is_idempotent() {
    let aggregator = Aggregator::new(builtin_registry(), 4);

    let first = aggregator.validate(pod_resources(20)).await;
    let second = aggregator.validate(pod_resources(20)).await;

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn faulting_checker_is_isolated_per_resource() {
    let mut registry = CheckRegistry::new();
    registry.register(ResourceKind::Pod, Arc::new(PanickingChecker));
    registry.register(ResourceKind::Pod, Arc::new(InfoChecker));
    let aggregator = Aggregator::new(Arc::new(registry), 4);

    let report = aggregator.validate(pod_resources(3)).await;

    assert_eq!(report.outcomes.len(), 3);
    for outcome in &report.outcomes {
        let faults: Vec<_> = outcome
            .findings
            .iter()
            .filter(|f| f.code == RULE_FAULT_CODE)
            .collect();
        assert_eq!(faults.len(), 1, "one fault finding per resource");
        assert_eq!(faults[0].severity, Severity::Error);
        assert!(faults[0].message.contains("panicking-checker"));
        assert!(!outcome.passed);

        // The checker registered after the faulty one still ran.
        assert!(outcome.findings.iter().any(|f| f.code == "MV9100"));
    }
    assert_eq!(report.worst_severity, Severity::Error);
}

#[tokio::test]
async fn report_groups_resources_in_canonical_order() {
    let aggregator = Aggregator::new(builtin_registry(), 8);
    let mut resources = pod_resources(10);
    resources.reverse();

    let report = aggregator.validate(resources).await;

    let ids: Vec<ResourceId> = report.outcomes.iter().map(|o| o.resource.clone()).collect();
    assert_eq!(ids.len(), 10);
    assert!(ids.windows(2).all(|pair| pair[0] <= pair[1]));
}
