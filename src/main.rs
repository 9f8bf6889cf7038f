//! Application Shell Entry Point
//!
//! Initializes logging, loads configuration, wires the shell over the
//! available host collaborators, and performs the startup navigation.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use station_spa::core::host::{MemoryDocument, NullNotifier};
use station_spa::core::{Config, SpaApp};

#[tokio::main]
async fn main() -> Result<()> {
    // Load a .env file when present, then build configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config.logging.filter);

    info!("Starting {} shell", config.site.name);

    let network = build_network();
    let document = Arc::new(MemoryDocument::new());
    let app = SpaApp::new(config, network, document.clone(), Arc::new(NullNotifier));

    let outcome = app.start().await;
    info!(?outcome, title = %document.title(), "startup navigation finished");

    Ok(())
}

#[cfg(feature = "http")]
fn build_network() -> Arc<dyn station_spa::core::host::Network> {
    Arc::new(station_spa::core::host::HttpNetwork::new())
}

#[cfg(not(feature = "http"))]
fn build_network() -> Arc<dyn station_spa::core::host::Network> {
    Arc::new(station_spa::core::host::MemoryNetwork::new())
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` wins when set; the configured filter is the fallback.
fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
