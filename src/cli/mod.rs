//! Command-line interface for meshview.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "meshview",
    version,
    about = "Service mesh topology aggregation and configuration validation"
)]
pub struct Cli {
    /// Configuration file; defaults to meshview.yaml plus MESHVIEW_* env vars
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the mesh API server
    Serve,
    /// Validate a resource manifest and print the report as JSON
    Validate(commands::validate::ValidateArgs),
}
