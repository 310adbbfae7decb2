//! Integration tests for the mesh facade, in particular the access gate.

use std::sync::Arc;

use meshview::application::{Aggregator, CheckRegistry, ClusterInfoCollector, MeshService};
use meshview::domain::models::{ClusterEndpoint, Config, Principal};
use meshview::domain::ports::ControlPlaneClient;
use meshview::infrastructure::cluster::{MockControlPlaneClient, MockNamespaceAccess};
use meshview::MeshError;

fn test_config() -> Arc<Config> {
    Arc::new(Config {
        home_cluster: "east".to_string(),
        clusters: vec![ClusterEndpoint {
            name: "east".to_string(),
            url: "mock://east".to_string(),
            network: "east-net".to_string(),
        }],
        ..Config::default()
    })
}

fn service_with(
    home: &Arc<MockControlPlaneClient>,
    access: MockNamespaceAccess,
) -> MeshService {
    let config = test_config();
    let collector =
        ClusterInfoCollector::new(vec![Arc::clone(home) as Arc<dyn ControlPlaneClient>]);
    let registry = Arc::new(CheckRegistry::with_builtin_checks(&config));
    let aggregator = Aggregator::new(registry, config.aggregator.max_parallel);
    MeshService::new(config, collector, aggregator, Arc::new(access))
}

#[tokio::test]
async fn denied_principal_gets_access_denied_and_no_collection_happens() {
    let home = Arc::new(MockControlPlaneClient::new("east", "east-net", true));
    let service = service_with(&home, MockNamespaceAccess::denying());

    let result = service.get_mesh(&Principal::new("mallory")).await;

    match result {
        Err(MeshError::AccessDenied { namespace, .. }) => {
            assert_eq!(namespace, "istio-system");
        }
        other => panic!("expected AccessDenied, got {other:?}"),
    }
    assert_eq!(home.descriptor_call_count(), 0, "collector must not run");
}

#[tokio::test]
async fn failing_access_query_denies() {
    let home = Arc::new(MockControlPlaneClient::new("east", "east-net", true));
    let service = service_with(&home, MockNamespaceAccess::failing());

    let result = service.get_mesh(&Principal::new("alice")).await;

    assert!(matches!(result, Err(MeshError::AccessDenied { .. })));
    assert_eq!(home.descriptor_call_count(), 0);
}

#[tokio::test]
async fn allowed_principal_gets_a_mesh_snapshot() {
    let home = Arc::new(MockControlPlaneClient::new("east", "east-net", true));
    let service = service_with(&home, MockNamespaceAccess::allowing());

    let mesh = service.get_mesh(&Principal::new("alice")).await.unwrap();

    assert_eq!(mesh.clusters.len(), 1);
    assert_eq!(mesh.clusters[0].name, "east");
    assert!(mesh.clusters[0].is_home_cluster);
    assert!(mesh.clusters[0].accessible);
    assert_eq!(home.descriptor_call_count(), 1);
}

#[tokio::test]
async fn get_clusters_needs_no_access_gate() {
    let home = Arc::new(MockControlPlaneClient::new("east", "east-net", true));
    let access = MockNamespaceAccess::denying();
    let access_calls = Arc::clone(&access.calls);
    let service = service_with(&home, access);

    let clusters = service.get_clusters().await.unwrap();

    assert_eq!(clusters.len(), 1);
    assert_eq!(access_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}
