//! Checks that a Pod carries an injected sidecar proxy container.

use super::{CheckVerdict, Checker};
use crate::domain::models::{Finding, PodView, ResourceView, Severity};

/// Annotation that opts a Pod out of sidecar injection.
const INJECT_ANNOTATION: &str = "sidecar.istio.io/inject";

/// Rule code for a Pod running without a sidecar.
const CODE: &str = "MV0101";

/// Passes iff any container image equals or is prefixed by the configured
/// sidecar image reference. A Pod annotated to disable injection is exempt.
/// Failure yields exactly one Warning finding; a Pod with no containers
/// trivially fails.
pub struct SidecarPresenceChecker {
    sidecar_image: String,
}

impl SidecarPresenceChecker {
    pub fn new(sidecar_image: impl Into<String>) -> Self {
        Self {
            sidecar_image: sidecar_image.into(),
        }
    }

    fn injection_disabled(pod: &PodView) -> bool {
        pod.annotations
            .get(INJECT_ANNOTATION)
            .is_some_and(|v| v == "false")
    }
}

impl Checker for SidecarPresenceChecker {
    fn name(&self) -> &'static str {
        "sidecar-presence"
    }

    fn check(&self, view: &ResourceView) -> CheckVerdict {
        let ResourceView::Pod(pod) = view else {
            return CheckVerdict::pass();
        };

        if Self::injection_disabled(pod) {
            return CheckVerdict::pass();
        }

        for container in &pod.containers {
            if container.image.starts_with(&self.sidecar_image) {
                return CheckVerdict::pass();
            }
        }

        CheckVerdict::fail_with(Finding::new(
            CODE,
            Severity::Warning,
            "Pod has no sidecar proxy",
        ))
    }
}
