//! Checks that Service ports follow the mesh protocol-naming convention.

use super::{CheckVerdict, Checker};
use crate::domain::models::{Finding, ResourceView, Severity};

/// Rule code for an invalidly named service port.
const CODE: &str = "MV0201";

/// Protocols a port name may declare, either exactly or as a `-` prefix.
const PROTOCOLS: &[&str] = &[
    "http", "http2", "grpc", "grpc-web", "tcp", "tls", "udp", "mongo", "redis", "mysql",
];

/// Service ports must be named `<protocol>` or `<protocol>-<suffix>` for
/// the mesh to route them by protocol. Unnamed ports are left alone (the
/// protocol is then inferred). One Error finding per violating port,
/// located at `spec/ports[i]`.
pub struct PortNameChecker;

fn name_is_valid(name: &str) -> bool {
    PROTOCOLS
        .iter()
        .any(|p| name == *p || name.strip_prefix(p).is_some_and(|rest| rest.starts_with('-')))
}

impl Checker for PortNameChecker {
    fn name(&self) -> &'static str {
        "port-name"
    }

    fn check(&self, view: &ResourceView) -> CheckVerdict {
        let ResourceView::Service(service) = view else {
            return CheckVerdict::pass();
        };

        let findings: Vec<Finding> = service
            .ports
            .iter()
            .enumerate()
            .filter_map(|(i, port)| {
                let name = port.name.as_deref()?;
                if name_is_valid(name) {
                    None
                } else {
                    Some(
                        Finding::new(
                            CODE,
                            Severity::Error,
                            format!("port name '{name}' does not follow the <protocol>[-suffix] convention"),
                        )
                        .with_path(format!("spec/ports[{i}]")),
                    )
                }
            })
            .collect();

        let passed = findings.is_empty();
        CheckVerdict { findings, passed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ServicePortView, ServiceView};

    fn service(names: &[Option<&str>]) -> ResourceView {
        ResourceView::Service(ServiceView {
            ports: names
                .iter()
                .enumerate()
                .map(|(i, name)| ServicePortView {
                    name: name.map(String::from),
                    port: 8000 + u16::try_from(i).unwrap(),
                })
                .collect(),
        })
    }

    #[test]
    fn accepts_bare_protocol_and_suffixed_names() {
        let verdict = PortNameChecker.check(&service(&[
            Some("http"),
            Some("grpc-web"),
            Some("tcp-metrics"),
            Some("http2-admin"),
        ]));
        assert!(verdict.passed);
        assert!(verdict.findings.is_empty());
    }

    #[test]
    fn rejects_names_outside_the_convention() {
        let verdict = PortNameChecker.check(&service(&[Some("web"), Some("http")]));
        assert!(!verdict.passed);
        assert_eq!(verdict.findings.len(), 1);
        assert_eq!(verdict.findings[0].severity, Severity::Error);
        assert_eq!(verdict.findings[0].path, "spec/ports[0]");
    }

    #[test]
    fn protocol_must_be_a_whole_segment() {
        // "httpx" starts with "http" but is not http or http-<suffix>.
        let verdict = PortNameChecker.check(&service(&[Some("httpx")]));
        assert!(!verdict.passed);
    }

    #[test]
    fn unnamed_ports_are_ignored() {
        let verdict = PortNameChecker.check(&service(&[None, None]));
        assert!(verdict.passed);
        assert!(verdict.findings.is_empty());
    }

    #[test]
    fn one_finding_per_violating_port() {
        let verdict = PortNameChecker.check(&service(&[Some("web"), Some("admin"), Some("grpc")]));
        assert_eq!(verdict.findings.len(), 2);
        let paths: Vec<_> = verdict.findings.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["spec/ports[0]", "spec/ports[1]"]);
    }
}
