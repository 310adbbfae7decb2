use std::time::Duration;
use thiserror::Error;

/// Errors a control-plane adapter can surface for a single query.
///
/// These stay at the port boundary: the collector converts them into
/// `accessible: false` descriptors or `Fetched::Failed` fields, and only
/// escalates when every cluster fails.
#[derive(Debug, Clone, Error)]
pub enum ClusterClientError {
    #[error("control plane unreachable: {0}")]
    Unreachable(String),

    #[error("control plane request timed out after {0:?}")]
    Timeout(Duration),

    #[error("control plane returned status {0}")]
    Status(u16),

    #[error("failed to decode control plane response: {0}")]
    Decode(String),
}
