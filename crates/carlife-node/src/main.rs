//! # CarLife Node
//!
//! Entry point. Configuration comes from the environment; see
//! [`carlife_node::NodeConfig::from_env`],
//! [`carlife_registry::prelude::RegistryConfig::from_env`] and
//! [`carlife_telemetry::TelemetryConfig::from_env`].

use anyhow::{Context, Result};
use carlife_node::{Node, NodeConfig};
use carlife_telemetry::{init_telemetry, TelemetryConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("failed to initialize logging")?;

    let config = NodeConfig::from_env()?;
    let mut node = Node::new(config)?;
    node.start();

    info!("Registry is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    let report = node.shutdown().await?;
    info!(
        mints = report.stats.mints,
        rejected = report.stats.rejected_calls,
        journaled = report.journal.len(),
        complete = report.journal.is_complete(),
        "Registry stopped"
    );
    Ok(())
}
