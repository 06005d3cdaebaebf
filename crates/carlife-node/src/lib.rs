//! # CarLife Node
//!
//! Wires one registry deployment for a long-running process.
//!
//! ## Startup Sequence
//!
//! 1. Logging (`carlife-telemetry`, done by the binary)
//! 2. Node settings: admin account and bus capacity ([`NodeConfig`])
//! 3. Registry settings (`RegistryConfig`)
//! 4. Registry over the in-memory ledger, system clock and event bus
//! 5. Maintenance journal task fed from the bus
//!
//! ## Shutdown
//!
//! [`Node::shutdown`] stops the journal task after it has folded everything
//! already published, and returns the final statistics and journal.

#![warn(missing_docs)]
#![warn(clippy::all)]

use anyhow::{bail, Context, Result};
use carlife_registry::prelude::*;
use shared_bus::{InMemoryEventBus, Subscription, SubscriptionError, DEFAULT_CHANNEL_CAPACITY};
use std::env;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// The registry flavour a node runs.
pub type NodeRegistry = RegistryService<AllowListAuthorization, InMemoryTokenLedger>;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Process-level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Initial admin of the allow-list policy.
    pub admin: AccountId,
    /// Notification bus capacity per subscriber.
    pub bus_capacity: usize,
    /// Registry deployment settings.
    pub registry: RegistryConfig,
}

impl NodeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CARLIFE_ADMIN`: Admin account, 20-byte hex (required)
    /// - `CARLIFE_BUS_CAPACITY`: Envelopes buffered per subscriber (default: 1000)
    /// - every variable read by `RegistryConfig::from_env`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin = lookup("CARLIFE_ADMIN")
            .context("CARLIFE_ADMIN must name the admin account")?
            .trim()
            .parse::<AccountId>()
            .context("invalid CARLIFE_ADMIN")?;
        if admin.is_zero() {
            bail!("CARLIFE_ADMIN must not be the zero account");
        }

        let bus_capacity = match lookup("CARLIFE_BUS_CAPACITY") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("invalid CARLIFE_BUS_CAPACITY: {value:?}"))?,
            None => DEFAULT_CHANNEL_CAPACITY,
        };
        if bus_capacity == 0 {
            bail!("CARLIFE_BUS_CAPACITY must be at least 1");
        }

        let registry = RegistryConfig::from_lookup(&lookup)?;
        Ok(Self {
            admin,
            bus_capacity,
            registry,
        })
    }
}

// =============================================================================
// NODE
// =============================================================================

/// What a node hands back when it stops.
#[derive(Debug, Clone)]
pub struct NodeReport {
    /// Final service statistics.
    pub stats: ServiceStats,
    /// Every maintenance visit seen on the bus.
    pub journal: MaintenanceJournal,
}

/// A running registry deployment.
pub struct Node {
    registry: Arc<NodeRegistry>,
    bus: Arc<InMemoryEventBus>,
    shutdown_tx: watch::Sender<bool>,
    journal_task: Option<JoinHandle<MaintenanceJournal>>,
}

impl Node {
    /// Builds the registry and its collaborators. Nothing runs until
    /// [`Self::start`].
    pub fn new(config: NodeConfig) -> Result<Self> {
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));
        let registry = RegistryService::new(
            AllowListAuthorization::new(config.admin),
            Arc::new(InMemoryTokenLedger::new()),
            bus.clone(),
            Arc::new(SystemClock),
            config.registry,
        )
        .context("invalid registry configuration")?;
        let (shutdown_tx, _) = watch::channel(false);

        info!(admin = %config.admin, bus_capacity = config.bus_capacity, "Node created");
        Ok(Self {
            registry: Arc::new(registry),
            bus,
            shutdown_tx,
            journal_task: None,
        })
    }

    /// The registry, for callers to drive.
    #[must_use]
    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    /// Spawns the journal task. Calling it again has no effect.
    pub fn start(&mut self) {
        if self.journal_task.is_some() {
            return;
        }
        let feed = self.bus.subscribe(MaintenanceJournal::filter());
        let shutdown = self.shutdown_tx.subscribe();
        self.journal_task = Some(tokio::spawn(run_journal(feed, shutdown)));
        info!("Maintenance journal started");
    }

    /// Stops the journal task and reports.
    pub async fn shutdown(mut self) -> Result<NodeReport> {
        let _ = self.shutdown_tx.send(true);
        let journal = match self.journal_task.take() {
            Some(task) => task.await.context("maintenance journal task failed")?,
            None => MaintenanceJournal::new(),
        };
        let stats = self.registry.stats().await;
        info!(journaled = journal.len(), "Node shut down");
        Ok(NodeReport { stats, journal })
    }
}

async fn run_journal(
    mut feed: Subscription,
    mut shutdown: watch::Receiver<bool>,
) -> MaintenanceJournal {
    let mut journal = MaintenanceJournal::new();
    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            received = feed.recv() => match received {
                Ok(envelope) => {
                    journal.apply(&envelope);
                }
                Err(SubscriptionError::Lagged { missed }) => {
                    journal.note_gap(feed.last_sequence(), missed);
                }
                Err(SubscriptionError::Closed) => return journal,
            },
        }
    }

    // Fold whatever was published before the stop signal
    if let Err(err) = journal.sync(&mut feed) {
        warn!(error = %err, "Final journal sync incomplete");
    }
    journal
}
