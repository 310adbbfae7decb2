//! Mock control-plane adapters for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::models::{
    CanaryUpgradeStatus, ClusterDescriptor, ClusterEndpoint, IstiodResourceThresholds,
    OutboundTrafficPolicy, Principal,
};
use crate::domain::ports::{ClusterClientError, ControlPlaneClient, NamespaceAccess};

/// Scriptable response for one singleton query.
#[derive(Debug, Clone)]
pub enum MockAnswer<T> {
    Value(T),
    Absent,
    Fail(String),
}

impl<T: Clone> MockAnswer<T> {
    fn resolve(&self) -> Result<Option<T>, ClusterClientError> {
        match self {
            MockAnswer::Value(value) => Ok(Some(value.clone())),
            MockAnswer::Absent => Ok(None),
            MockAnswer::Fail(reason) => Err(ClusterClientError::Unreachable(reason.clone())),
        }
    }
}

/// Mock control-plane client with per-query scripting and call counters.
pub struct MockControlPlaneClient {
    endpoint: ClusterEndpoint,
    is_home: bool,
    descriptor_fails: RwLock<bool>,
    outbound_policy: RwLock<MockAnswer<OutboundTrafficPolicy>>,
    thresholds: RwLock<MockAnswer<IstiodResourceThresholds>>,
    canary: RwLock<MockAnswer<CanaryUpgradeStatus>>,
    pub descriptor_calls: Arc<AtomicUsize>,
}

impl MockControlPlaneClient {
    pub fn new(name: impl Into<String>, network: impl Into<String>, is_home: bool) -> Self {
        let name = name.into();
        Self {
            endpoint: ClusterEndpoint {
                url: format!("mock://{name}"),
                name,
                network: network.into(),
            },
            is_home,
            descriptor_fails: RwLock::new(false),
            outbound_policy: RwLock::new(MockAnswer::Absent),
            thresholds: RwLock::new(MockAnswer::Absent),
            canary: RwLock::new(MockAnswer::Absent),
            descriptor_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make the identity query fail, simulating an unreachable cluster.
    pub async fn fail_descriptor(&self) {
        *self.descriptor_fails.write().await = true;
    }

    pub async fn set_outbound_policy(&self, answer: MockAnswer<OutboundTrafficPolicy>) {
        *self.outbound_policy.write().await = answer;
    }

    pub async fn set_thresholds(&self, answer: MockAnswer<IstiodResourceThresholds>) {
        *self.thresholds.write().await = answer;
    }

    pub async fn set_canary(&self, answer: MockAnswer<CanaryUpgradeStatus>) {
        *self.canary.write().await = answer;
    }

    pub fn descriptor_call_count(&self) -> usize {
        self.descriptor_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ControlPlaneClient for MockControlPlaneClient {
    fn endpoint(&self) -> &ClusterEndpoint {
        &self.endpoint
    }

    fn is_home(&self) -> bool {
        self.is_home
    }

    async fn cluster_descriptor(&self) -> Result<ClusterDescriptor, ClusterClientError> {
        self.descriptor_calls.fetch_add(1, Ordering::SeqCst);
        if *self.descriptor_fails.read().await {
            return Err(ClusterClientError::Unreachable(format!(
                "mock cluster '{}' is down",
                self.endpoint.name
            )));
        }
        Ok(ClusterDescriptor {
            name: self.endpoint.name.clone(),
            network: self.endpoint.network.clone(),
            api_endpoint: self.endpoint.url.clone(),
            is_home_cluster: self.is_home,
            accessible: true,
        })
    }

    async fn outbound_traffic_policy(
        &self,
    ) -> Result<Option<OutboundTrafficPolicy>, ClusterClientError> {
        self.outbound_policy.read().await.resolve()
    }

    async fn resource_thresholds(
        &self,
    ) -> Result<Option<IstiodResourceThresholds>, ClusterClientError> {
        self.thresholds.read().await.resolve()
    }

    async fn canary_upgrade_status(
        &self,
    ) -> Result<Option<CanaryUpgradeStatus>, ClusterClientError> {
        self.canary.read().await.resolve()
    }
}

/// Mock access port: a fixed allow/deny answer plus a call counter, so
/// tests can assert the gate short-circuits before any collection work.
pub struct MockNamespaceAccess {
    allow: bool,
    fail: bool,
    pub calls: Arc<AtomicUsize>,
}

impl MockNamespaceAccess {
    pub fn allowing() -> Self {
        Self {
            allow: true,
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn denying() -> Self {
        Self {
            allow: false,
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Access port whose query itself fails.
    pub fn failing() -> Self {
        Self {
            allow: false,
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl NamespaceAccess for MockNamespaceAccess {
    async fn can_read(
        &self,
        _principal: &Principal,
        _namespace: &str,
        _cluster: &str,
    ) -> Result<bool, ClusterClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ClusterClientError::Unreachable(
                "access endpoint down".to_string(),
            ));
        }
        Ok(self.allow)
    }
}
