//! reqwest adapter for a control plane's status API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;

use crate::domain::models::{
    CanaryUpgradeStatus, ClusterDescriptor, ClusterEndpoint, IstiodResourceThresholds,
    OutboundTrafficPolicy, Principal,
};
use crate::domain::ports::{ClusterClientError, ControlPlaneClient, NamespaceAccess};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for one cluster's control-plane status API.
///
/// Exposes the four topology queries under `{base}/status/...` and doubles
/// as the `NamespaceAccess` adapter: the home cluster's control plane also
/// answers namespace read-permission checks.
pub struct RemoteControlPlaneClient {
    http_client: ReqwestClient,
    endpoint: ClusterEndpoint,
    is_home: bool,
}

/// Wire shape of `GET /status/cluster`.
#[derive(Debug, Deserialize)]
struct ClusterStatusResponse {
    name: String,
    #[serde(default)]
    network: String,
    #[serde(default)]
    api_endpoint: String,
}

/// Wire shape of `GET /status/meshconfig`.
#[derive(Debug, Deserialize)]
struct MeshConfigResponse {
    outbound_traffic_policy: Option<OutboundTrafficPolicy>,
}

/// Wire shape of `GET /status/access`.
#[derive(Debug, Deserialize)]
struct AccessResponse {
    allowed: bool,
}

impl RemoteControlPlaneClient {
    pub fn new(
        http_client: ReqwestClient,
        endpoint: ClusterEndpoint,
        is_home: bool,
    ) -> Self {
        Self {
            http_client,
            endpoint,
            is_home,
        }
    }

    /// Build the shared HTTP client all cluster adapters reuse.
    pub fn build_http_client() -> Result<ReqwestClient, reqwest::Error> {
        ReqwestClient::builder().timeout(REQUEST_TIMEOUT).build()
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClusterClientError> {
        let url = format!("{}/{path}", self.endpoint.url.trim_end_matches('/'));
        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClusterClientError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ClusterClientError::Decode(err.to_string()))
    }

    /// Singleton endpoints answer 404 when the feature is not present;
    /// that maps to `Ok(None)`, not an error.
    async fn get_optional_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ClusterClientError> {
        match self.get_json::<T>(path, &[]).await {
            Ok(value) => Ok(Some(value)),
            Err(ClusterClientError::Status(404)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

fn classify_transport_error(err: reqwest::Error) -> ClusterClientError {
    if err.is_timeout() {
        ClusterClientError::Timeout(REQUEST_TIMEOUT)
    } else {
        ClusterClientError::Unreachable(err.to_string())
    }
}

#[async_trait]
impl ControlPlaneClient for RemoteControlPlaneClient {
    fn endpoint(&self) -> &ClusterEndpoint {
        &self.endpoint
    }

    fn is_home(&self) -> bool {
        self.is_home
    }

    async fn cluster_descriptor(&self) -> Result<ClusterDescriptor, ClusterClientError> {
        let status: ClusterStatusResponse = self.get_json("status/cluster", &[]).await?;
        Ok(ClusterDescriptor {
            name: status.name,
            network: status.network,
            api_endpoint: status.api_endpoint,
            is_home_cluster: self.is_home,
            accessible: true,
        })
    }

    async fn outbound_traffic_policy(
        &self,
    ) -> Result<Option<OutboundTrafficPolicy>, ClusterClientError> {
        let mesh_config: Option<MeshConfigResponse> =
            self.get_optional_json("status/meshconfig").await?;
        Ok(mesh_config.and_then(|c| c.outbound_traffic_policy))
    }

    async fn resource_thresholds(
        &self,
    ) -> Result<Option<IstiodResourceThresholds>, ClusterClientError> {
        self.get_optional_json("status/thresholds").await
    }

    async fn canary_upgrade_status(
        &self,
    ) -> Result<Option<CanaryUpgradeStatus>, ClusterClientError> {
        self.get_optional_json("status/canary").await
    }
}

#[async_trait]
impl NamespaceAccess for RemoteControlPlaneClient {
    async fn can_read(
        &self,
        principal: &Principal,
        namespace: &str,
        _cluster: &str,
    ) -> Result<bool, ClusterClientError> {
        let response: AccessResponse = self
            .get_json(
                "status/access",
                &[("principal", principal.as_str()), ("namespace", namespace)],
            )
            .await?;
        Ok(response.allowed)
    }
}
