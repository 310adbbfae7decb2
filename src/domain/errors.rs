//! Domain errors for the meshview engine.

use thiserror::Error;

/// Operation-level errors surfaced by the mesh facade.
///
/// Checker faults are deliberately not represented here: a failing rule is
/// recovered inside the aggregator and becomes an Error-severity finding,
/// never a request failure.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("access denied to namespace '{namespace}' on cluster '{cluster}': {reason}")]
    AccessDenied {
        namespace: String,
        cluster: String,
        reason: String,
    },

    #[error("mesh unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type MeshResult<T> = Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_denied_names_the_namespace_and_cluster() {
        let err = MeshError::AccessDenied {
            namespace: "istio-system".into(),
            cluster: "east".into(),
            reason: "principal not bound".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("istio-system"));
        assert!(msg.contains("east"));
    }
}
