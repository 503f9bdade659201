//! Dock Inventory
//!
//! Runs the dock service's registration worker for this node: loads the
//! configuration, opens the key-value backend, builds the dock discoverer for
//! the configured dock type and keeps its docks and pools reported until
//! interrupted.

use anyhow::Context as _;
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dock_inventory::{
    new_dock_discoverer, BackendFactory, DatabaseDriver, DiscoveryLoop, DockDiscoverer,
    InventoryConfig, StoreClient,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Dock Inventory - keeps this node's storage docks registered
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, env = "DOCK_INVENTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Key-value backend driver (memory, local)
    #[arg(long, env = "DB_DRIVER")]
    db_driver: Option<DatabaseDriver>,

    /// Root directory for the local backend
    #[arg(long, env = "DB_PATH")]
    db_path: Option<PathBuf>,

    /// Node name, overrides the system hostname
    #[arg(long, env = "NODE_ID")]
    node_id: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args);

    let config = load_config(&args)?;

    info!("Starting Dock Inventory");
    info!("  Version: {}", dock_inventory::VERSION);
    info!("  Database: {} ({})", config.database.driver, config.database.path.display());
    info!("  Dock type: {}", config.dock.dock_type);
    info!("  Discovery interval: {:?}", config.discovery_interval());

    let backend = BackendFactory::create(&config.database)
        .await
        .context("Failed to open database backend")?;
    let client = StoreClient::new(backend);

    let mut discoverer = new_dock_discoverer(&config, client);
    discoverer
        .init()
        .await
        .context("Failed to initialize dock discoverer")?;

    let cancel = CancellationToken::new();
    let (err_tx, mut err_rx) = mpsc::channel(16);

    // Errors from a cycle are logged; the loop keeps running
    let error_logger = tokio::spawn(async move {
        while let Some(e) = err_rx.recv().await {
            error!("Discovery cycle failed: {}", e);
        }
    });

    let worker =
        DiscoveryLoop::new(config.discovery_interval()).spawn(discoverer, cancel.clone(), err_tx);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown signal received");

    cancel.cancel();
    worker.await.context("Discovery loop panicked")?;
    error_logger.await.context("Error logger panicked")?;

    info!("Dock Inventory shutdown complete");
    Ok(())
}

// =============================================================================
// Configuration
// =============================================================================

/// Load the configuration file, then apply command line overrides
fn load_config(args: &Args) -> anyhow::Result<InventoryConfig> {
    let mut config = match &args.config {
        Some(path) => InventoryConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => InventoryConfig::default(),
    };

    if let Some(driver) = args.db_driver {
        config.database.driver = driver;
    }
    if let Some(path) = &args.db_path {
        config.database.path = path.clone();
    }
    if let Some(node_id) = &args.node_id {
        config.dock.node_id = Some(node_id.clone());
    }

    config.validate()?;
    Ok(config)
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
