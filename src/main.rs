//! Contact manager server - Main entry point
//!
//! This is the main executable for the contact manager server, which exposes
//! contact save/delete/list workflows over the Model Context Protocol and
//! broadcasts a change signal to connected subscribers after every
//! successful mutation.

use anyhow::Result;
use contact_manager_server::broadcast::ChangeBroadcaster;
use contact_manager_server::repositories::{ContactRepository, MemoryContactRepository};
use contact_manager_server::server::run_server;
use contact_manager_server::{seed, Config, ContactManagerServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize the contact store
    let repository = Arc::new(MemoryContactRepository::new()) as Arc<dyn ContactRepository>;

    if config.seed_on_startup {
        seed::initialize(repository.as_ref()).await?;
    }

    // Change-signal fan-out for connected clients
    let broadcaster = Arc::new(ChangeBroadcaster::new(config.broadcast_buffer));

    // Mirror change signals to the log until a push transport is attached
    let mut subscription = broadcaster.subscribe();
    tokio::spawn(async move {
        while let Some(signal) = subscription.recv().await {
            info!(?signal, "contacts changed");
        }
    });

    let server = ContactManagerServer::new(
        repository,
        broadcaster,
        Duration::from_secs(config.request_timeout),
    );

    info!("Contact manager server initialized");
    info!(
        "Request timeout: {}s, broadcast buffer: {}",
        config.request_timeout, config.broadcast_buffer
    );

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    run_server(server).await?;

    info!("Contact manager server shutdown complete");
    Ok(())
}
