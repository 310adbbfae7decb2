//! Runs every applicable checker over a set of resources and rolls the
//! results up into one deterministic `ValidationReport`.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::application::checkers::CheckRegistry;
use crate::domain::models::{CheckOutcome, Finding, ResourceId, ResourceView, ValidationReport};

/// Validation engine over a checker registry.
///
/// Resources are validated in parallel (bounded by `max_parallel`); all
/// checkers for a single resource run sequentially in registration order.
/// Outcomes are assembled in canonical resource order, so the report is
/// byte-identical across runs regardless of worker count or completion
/// order.
pub struct Aggregator {
    registry: Arc<CheckRegistry>,
    max_parallel: usize,
}

impl Aggregator {
    pub fn new(registry: Arc<CheckRegistry>, max_parallel: usize) -> Self {
        Self {
            registry,
            max_parallel: max_parallel.max(1),
        }
    }

    /// Validate every resource and build the mesh-wide report.
    ///
    /// A checker that faults internally is converted into a single
    /// Error-severity finding naming it; remaining checkers and resources
    /// still run. Partial results are always better than none.
    pub async fn validate(&self, resources: Vec<(ResourceId, ResourceView)>) -> ValidationReport {
        let semaphore = Arc::new(Semaphore::new(self.max_parallel));
        let mut workers: JoinSet<CheckOutcome> = JoinSet::new();

        for (id, view) in resources {
            let registry = Arc::clone(&self.registry);
            let semaphore = Arc::clone(&semaphore);
            workers.spawn(async move {
                // Holding a permit for the whole check bounds concurrency;
                // closed-semaphore errors cannot happen while we own it.
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                run_checks(&registry, &id, &view)
            });
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                // Checker panics are caught inside the worker; a join error
                // here means the worker itself was torn down mid-run.
                Err(err) => error!(error = %err, "validation worker failed"),
            }
        }

        let report = ValidationReport::from_outcomes(outcomes);
        debug!(
            resources = report.outcomes.len(),
            worst = %report.worst_severity,
            "validation run complete"
        );
        report
    }
}

/// Run every registered checker for one resource, sequentially and in
/// registration order. Each call is isolated: a panic becomes a synthetic
/// rule-fault finding and evaluation continues with the next checker.
fn run_checks(registry: &CheckRegistry, id: &ResourceId, view: &ResourceView) -> CheckOutcome {
    let mut findings = Vec::new();
    let mut passed = true;

    for checker in registry.checkers_for(id.kind) {
        match catch_unwind(AssertUnwindSafe(|| checker.check(view))) {
            Ok(verdict) => {
                findings.extend(verdict.findings);
                passed &= verdict.passed;
            }
            Err(_) => {
                error!(checker = checker.name(), resource = %id, "checker panicked");
                findings.push(Finding::rule_fault(checker.name()));
                passed = false;
            }
        }
    }

    CheckOutcome {
        resource: id.clone(),
        findings,
        passed,
    }
}
