use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("control_plane_namespace cannot be empty")]
    EmptyControlPlaneNamespace,

    #[error("sidecar_image cannot be empty")]
    EmptySidecarImage,

    #[error("home_cluster '{0}' is not a configured cluster")]
    UnknownHomeCluster(String),

    #[error("duplicate cluster name '{0}'")]
    DuplicateClusterName(String),

    #[error("cluster '{0}' has an empty url")]
    EmptyClusterUrl(String),

    #[error("Invalid max_parallel: {0}. Must be between 1 and 64")]
    InvalidMaxParallel(usize),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. meshview.yaml (project config)
    /// 3. meshview.local.yaml (local overrides, optional)
    /// 4. Environment variables (MESHVIEW_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("meshview.yaml"))
            .merge(Yaml::file("meshview.local.yaml"))
            .merge(Env::prefixed("MESHVIEW_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.control_plane_namespace.trim().is_empty() {
            return Err(ConfigError::EmptyControlPlaneNamespace);
        }

        if config.sidecar_image.trim().is_empty() {
            return Err(ConfigError::EmptySidecarImage);
        }

        let mut names = HashSet::new();
        for cluster in &config.clusters {
            if !names.insert(cluster.name.as_str()) {
                return Err(ConfigError::DuplicateClusterName(cluster.name.clone()));
            }
            if cluster.url.trim().is_empty() {
                return Err(ConfigError::EmptyClusterUrl(cluster.name.clone()));
            }
        }

        // Singleton facts need a home control plane; a clusterless config
        // is still valid for pure validation use.
        if !config.clusters.is_empty()
            && !config.clusters.iter().any(|c| c.name == config.home_cluster)
        {
            return Err(ConfigError::UnknownHomeCluster(config.home_cluster.clone()));
        }

        if config.aggregator.max_parallel == 0 || config.aggregator.max_parallel > 64 {
            return Err(ConfigError::InvalidMaxParallel(config.aggregator.max_parallel));
        }

        if config.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::InvalidBindAddress(config.server.bind.clone()));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
