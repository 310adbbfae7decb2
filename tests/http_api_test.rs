//! HTTP contract tests: the status codes are contractual, not incidental.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use meshview::application::{Aggregator, CheckRegistry, ClusterInfoCollector, MeshService};
use meshview::domain::models::{ClusterEndpoint, Config, PodView, ResourceEntry, ResourceView};
use meshview::domain::ports::ControlPlaneClient;
use meshview::infrastructure::cluster::{
    MockAnswer, MockControlPlaneClient, MockNamespaceAccess,
};
use meshview::infrastructure::http::router;

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

fn app(clients: Vec<Arc<MockControlPlaneClient>>, access: MockNamespaceAccess) -> axum::Router {
    let config = test_config();
    let collector = ClusterInfoCollector::new(
        clients
            .iter()
            .map(|c| Arc::clone(c) as Arc<dyn ControlPlaneClient>)
            .collect(),
    );
    let registry = Arc::new(CheckRegistry::with_builtin_checks(&config));
    let aggregator = Aggregator::new(registry, config.aggregator.max_parallel);
    let service = Arc::new(MeshService::new(config, collector, aggregator, Arc::new(access)));
    router(service)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn get_mesh_without_access_is_403() {
    let home = Arc::new(MockControlPlaneClient::new("east", "east-net", true));
    let app = app(vec![home], MockNamespaceAccess::denying());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/mesh")
                .header("x-forwarded-user", "mallory")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("istio-system"));
}

#[tokio::test]
async fn get_clusters_is_503_when_every_cluster_fails() {
    let east = Arc::new(MockControlPlaneClient::new("east", "east-net", true));
    let west = Arc::new(MockControlPlaneClient::new("west", "west-net", false));
    east.fail_descriptor().await;
    west.fail_descriptor().await;
    let app = app(vec![east, west], MockNamespaceAccess::allowing());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/clusters")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn get_clusters_tolerates_a_partial_failure() {
    let east = Arc::new(MockControlPlaneClient::new("east", "east-net", true));
    let west = Arc::new(MockControlPlaneClient::new("west", "west-net", false));
    west.fail_descriptor().await;
    let app = app(vec![east, west], MockNamespaceAccess::allowing());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/clusters")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let clusters = body.as_array().unwrap();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0]["name"], "east");
    assert_eq!(clusters[0]["accessible"], true);
    assert_eq!(clusters[1]["name"], "west");
    assert_eq!(clusters[1]["accessible"], false);
}

#[tokio::test]
async fn failed_singleton_query_is_still_200() {
    let home = Arc::new(MockControlPlaneClient::new("east", "east-net", true));
    home.set_outbound_policy(MockAnswer::Fail("down".to_string()))
        .await;
    let app = app(vec![home], MockNamespaceAccess::allowing());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/mesh/outbound-traffic-policy")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "failed");
    assert_eq!(body["reason"], "control plane unreachable: down");
}

#[tokio::test]
async fn validate_returns_a_report_with_per_resource_outcomes() {
    let home = Arc::new(MockControlPlaneClient::new("east", "east-net", true));
    let app = app(vec![home], MockNamespaceAccess::allowing());

    let entries = vec![ResourceEntry {
        namespace: "default".to_string(),
        name: "web".to_string(),
        resource: ResourceView::Pod(PodView::default()),
    }];
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/validate")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&entries).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["worst_severity"], "warning");
    let outcomes = body["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0]["resource"]["kind"], "Pod");
    assert_eq!(outcomes[0]["passed"], false);
    assert_eq!(outcomes[0]["findings"][0]["code"], "MV0101");
}
