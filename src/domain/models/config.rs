use serde::{Deserialize, Serialize};

/// Main configuration structure for meshview.
///
/// Loaded once at startup and passed into `MeshService` at construction;
/// there is no process-global configuration access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Namespace the control plane runs in; the access gate checks read
    /// permission on this namespace before producing mesh info.
    #[serde(default = "default_control_plane_namespace")]
    pub control_plane_namespace: String,

    /// Name of the home cluster. Its control plane is authoritative for
    /// singleton mesh facts (outbound policy, thresholds, canary status).
    #[serde(default = "default_home_cluster")]
    pub home_cluster: String,

    /// Image reference that identifies the sidecar proxy container.
    /// Containers whose image equals or is prefixed by this pass the
    /// sidecar-presence check.
    #[serde(default = "default_sidecar_image")]
    pub sidecar_image: String,

    /// Control-plane endpoints, one per cluster.
    #[serde(default)]
    pub clusters: Vec<ClusterEndpoint>,

    /// Aggregator tuning
    #[serde(default)]
    pub aggregator: AggregatorConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_control_plane_namespace() -> String {
    "istio-system".to_string()
}

fn default_home_cluster() -> String {
    "default".to_string()
}

fn default_sidecar_image() -> String {
    "docker.io/istio/proxy".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            control_plane_namespace: default_control_plane_namespace(),
            home_cluster: default_home_cluster(),
            sidecar_image: default_sidecar_image(),
            clusters: vec![],
            aggregator: AggregatorConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// One cluster's control-plane endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClusterEndpoint {
    pub name: String,
    /// Base URL of the control-plane status API.
    pub url: String,
    #[serde(default)]
    pub network: String,
}

/// Aggregator tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AggregatorConfig {
    /// Maximum number of resources validated concurrently (1-64).
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,
}

const fn default_max_parallel() -> usize {
    8
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_parallel: default_max_parallel(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:8444`.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8444".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
