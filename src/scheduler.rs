// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Recon Scheduler
 * Sweep loop: due-ness, dispatch, isolation, shutdown
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::watch;
use tracing::{error, info};

use crate::metrics::ReconMetrics;
use crate::orchestrator::ScanOrchestrator;
use crate::store::SubdomainStore;

/// The long-running control loop. Nothing below it is allowed to terminate
/// the process: per-domain failures are logged and skipped, sweep-level
/// failures are logged and followed by the normal sleep. Only the shutdown
/// flag ends the loop.
pub struct Scheduler {
    store: Arc<dyn SubdomainStore>,
    orchestrator: ScanOrchestrator,
    metrics: ReconMetrics,
    sweep_interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl Scheduler {
    pub fn new(
        store: Arc<dyn SubdomainStore>,
        orchestrator: ScanOrchestrator,
        metrics: ReconMetrics,
        sweep_interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            store,
            orchestrator,
            metrics,
            sweep_interval,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        info!(
            sweep_interval_secs = self.sweep_interval.as_secs(),
            "Scheduler started"
        );

        loop {
            if *self.shutdown.borrow() {
                break;
            }

            if let Err(err) = self.sweep().await {
                error!(error = %err, "Critical error in sweep; continuing after sleep");
            }

            self.metrics.log_summary();

            tokio::select! {
                _ = tokio::time::sleep(self.sweep_interval) => {}
                _ = self.shutdown.changed() => {
                    if *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Scheduler stopped");
    }

    /// One pass over the domain set. Errors escaping here are sweep-level;
    /// per-domain failures are contained inside the loop body.
    async fn sweep(&mut self) -> Result<()> {
        let domains = self.store.list_domains().await?;
        info!(count = domains.len(), "Checking domains");

        let now = Utc::now();
        for domain in domains {
            // Shutdown stops new domains; it does not interrupt one in flight
            if *self.shutdown.borrow() {
                break;
            }
            if !domain.is_due(now) {
                continue;
            }

            match self.orchestrator.scan_domain(&domain).await {
                Ok(()) => self.metrics.record_scan_completed(),
                Err(err) => {
                    self.metrics.record_scan_failed();
                    error!(
                        domain = %domain.name,
                        error = %err,
                        "Domain scan failed; retrying next sweep"
                    );
                }
            }
        }

        Ok(())
    }
}
