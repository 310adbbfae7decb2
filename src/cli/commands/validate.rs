//! `meshview validate`: run the checker framework over a manifest file.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{Aggregator, CheckRegistry};
use crate::domain::models::{ResourceEntry, Severity};
use crate::infrastructure::logging;

#[derive(Args)]
pub struct ValidateArgs {
    /// Manifest of resources to validate (YAML or JSON list of entries)
    #[arg(long)]
    pub file: PathBuf,
}

pub async fn execute(args: ValidateArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    logging::init(&config.logging)?;

    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read manifest {}", args.file.display()))?;
    let entries: Vec<ResourceEntry> =
        serde_yaml::from_str(&raw).context("Failed to parse resource manifest")?;

    let registry = Arc::new(CheckRegistry::with_builtin_checks(&config));
    let aggregator = Aggregator::new(registry, config.aggregator.max_parallel);
    let resources = entries.into_iter().map(ResourceEntry::into_pair).collect();
    let report = aggregator.validate(resources).await;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.worst_severity >= Severity::Warning {
        std::process::exit(1);
    }
    Ok(())
}
