//! Meshview CLI entry point.

use clap::Parser;

use meshview::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => meshview::cli::commands::serve::execute(cli.config).await,
        Commands::Validate(args) => {
            meshview::cli::commands::validate::execute(args, cli.config).await
        }
    }
}
