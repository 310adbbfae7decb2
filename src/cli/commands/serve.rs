//! `meshview serve`: wire the engine together and run the API server.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::application::{Aggregator, CheckRegistry, ClusterInfoCollector, MeshService};
use crate::domain::ports::{ControlPlaneClient, NamespaceAccess};
use crate::infrastructure::cluster::RemoteControlPlaneClient;
use crate::infrastructure::{http, logging};

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = Arc::new(super::load_config(config_path.as_deref())?);
    logging::init(&config.logging)?;

    if config.clusters.is_empty() {
        bail!("serve requires at least one configured cluster (the home cluster)");
    }

    let http_client = RemoteControlPlaneClient::build_http_client()
        .context("Failed to build control-plane HTTP client")?;

    let mut clients: Vec<Arc<dyn ControlPlaneClient>> = Vec::new();
    let mut access: Option<Arc<dyn NamespaceAccess>> = None;
    for endpoint in &config.clusters {
        let is_home = endpoint.name == config.home_cluster;
        let client = Arc::new(RemoteControlPlaneClient::new(
            http_client.clone(),
            endpoint.clone(),
            is_home,
        ));
        if is_home {
            // The home control plane also answers access checks.
            access = Some(Arc::clone(&client) as Arc<dyn NamespaceAccess>);
        }
        clients.push(client);
    }
    let Some(access) = access else {
        bail!("home_cluster '{}' is not configured", config.home_cluster);
    };

    let registry = Arc::new(CheckRegistry::with_builtin_checks(&config));
    let aggregator = Aggregator::new(registry, config.aggregator.max_parallel);
    let collector = ClusterInfoCollector::new(clients);
    let service = Arc::new(MeshService::new(
        Arc::clone(&config),
        collector,
        aggregator,
        access,
    ));

    info!(
        clusters = config.clusters.len(),
        home = %config.home_cluster,
        "starting mesh API server"
    );
    http::serve(service, &config.server.bind).await
}
