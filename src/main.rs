//! Orion Dashboard Server
//!
//! Run with: cargo run --bin orion
//!
//! # Configuration
//!
//! Settings come from the first config file found (see `--config`), then
//! environment variables:
//! - `ORION_SERVICE_URL`: Analytics service origin
//! - `ORION_HOST`: Host to bind to (default: 127.0.0.1)
//! - `ORION_PORT`: Port to listen on (default: 8090)
//! - `ORION_LOG_LEVEL`, `ORION_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter directive, overrides the log level

use anyhow::Context;
use clap::Parser;
use orion::config::Config;
use orion::service::AnalyticsClient;
use orion::web::{serve, AppState};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "orion")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Orion dashboard server")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Analytics service origin
    #[arg(long)]
    service_url: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = args.service_url {
        config.service.base_url = url;
    }
    if let Some(port) = args.port {
        config.dashboard.port = port;
    }

    orion::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!("Starting Orion dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Analytics service: {}", config.service.base_url);

    let client = AnalyticsClient::new(config.service.client_config())
        .context("Failed to build analytics client")?;

    let state = AppState::new(Arc::new(client), &config.dashboard);
    serve(state, &config.dashboard).await?;

    tracing::info!("Orion dashboard stopped");
    Ok(())
}
