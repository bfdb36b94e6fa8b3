// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Recon Worker Binary
 * Long-running daemon: discovers and verifies subdomains for monitored domains
 *
 * © 2026 Bountyy Oy
 */

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lonkero_recon::config::ReconConfig;
use lonkero_recon::metrics::ReconMetrics;
use lonkero_recon::orchestrator::ScanOrchestrator;
use lonkero_recon::osint::{OsintAggregator, SubfinderRunner};
use lonkero_recon::scheduler::Scheduler;
use lonkero_recon::store::{PgStore, PgStoreConfig, SubdomainStore};
use lonkero_recon::verify::VerifyPipeline;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recon Worker");

    let config = ReconConfig::default();
    info!(
        sweep_interval = config.sweep_interval_secs,
        verify_concurrency = config.verify_concurrency,
        "Worker configuration loaded"
    );

    let store = PgStore::new(PgStoreConfig {
        database_url: config.database_url.clone(),
        pool_size: config.store_pool_size,
    })
    .await?;
    store.init_schema().await?;
    let store: Arc<dyn SubdomainStore> = Arc::new(store);

    let aggregator = OsintAggregator::new(SubfinderRunner::new(config.subfinder_path.clone()))?;
    let verifier = Arc::new(VerifyPipeline::new()?);
    let metrics = ReconMetrics::new();

    let orchestrator = ScanOrchestrator::new(
        Arc::clone(&store),
        aggregator,
        verifier,
        metrics.clone(),
    )
    .with_verify_concurrency(config.verify_concurrency);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = Scheduler::new(
        store,
        orchestrator,
        metrics,
        Duration::from_secs(config.sweep_interval_secs),
        shutdown_rx,
    );

    // In-flight checks are not drained on shutdown; they complete or hit
    // their own timeouts. Exiting between units of work is enough.
    tokio::select! {
        _ = scheduler.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    }

    info!("Recon Worker stopped");
    Ok(())
}
