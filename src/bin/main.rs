//! docker-dns binary entry point.

use clap::Parser;
use docker_dns::{metrics, telemetry, Config, DockerEvents, EtcdStore, HostTable, Synchronizer};
use std::path::PathBuf;
use tracing::info;

/// Publishes DNS records for Docker containers into etcd.
#[derive(Parser, Debug)]
#[command(name = "docker-dns")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML).
    #[arg(short, long, default_value = "docker-dns.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize telemetry
    telemetry::init(&config.telemetry).map_err(|e| e as Box<dyn std::error::Error>)?;

    info!(
        config_file = %args.config.display(),
        etcd_endpoint = %config.etcd_endpoint,
        hosts = config.hosts.len(),
        "Starting docker-dns"
    );

    // Build the immutable host table; an unusable table is fatal.
    let table = HostTable::from_config(&config.hosts)?;
    metrics::record_host_table_size(table.len());

    // Connect external collaborators; failures here are fatal.
    let store = EtcdStore::connect(&config.etcd_endpoint).await?;
    let source = DockerEvents::connect()?;

    let synchronizer = Synchronizer::new(source, table, store);

    // The loop itself runs until the process is terminated.
    tokio::select! {
        _ = synchronizer.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("received interrupt, shutting down");
        }
    }

    Ok(())
}
