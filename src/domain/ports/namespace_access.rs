use async_trait::async_trait;

use super::errors::ClusterClientError;
use crate::domain::models::Principal;

/// Port answering whether a principal may read a namespace on a cluster.
///
/// The facade consults this before any collection work; the engine itself
/// performs no authentication or authorization beyond asking.
#[async_trait]
pub trait NamespaceAccess: Send + Sync {
    async fn can_read(
        &self,
        principal: &Principal,
        namespace: &str,
        cluster: &str,
    ) -> Result<bool, ClusterClientError>;
}
