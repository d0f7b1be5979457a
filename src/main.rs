use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod dataset;

use cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mizan=debug,compute=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Mizan pivot reports starting up");

    // Load environment configuration
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.run()
}
