// server/src/main.rs

// Entry point for the enrollment site server: parses the command line,
// loads configuration, opens the registry store, and serves the API until
// interrupted.

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::oneshot;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::load_site_config;
use storage::RegistryStore;

#[derive(Debug, Parser)]
#[command(name = "server", about = "School reservation site API server")]
struct ServerArgs {
    /// Path to the YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Overrides the configured data directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ServerArgs::parse();

    let mut config = load_site_config(args.config)?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_directory = data_dir.display().to_string();
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    let registry = Arc::new(
        RegistryStore::open(&config.data_directory)
            .with_context(|| format!("Failed to open data directory {}", config.data_directory))?,
    );
    info!("Registry opened at {}", config.data_directory);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", err);
            return;
        }
        info!("Received shutdown signal.");
        let _ = shutdown_tx.send(());
    });

    rest_api::start_server(addr, registry, shutdown_rx).await
}
