// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scan Orchestrator
 * Drives one due domain: enumerate, persist, verify, stamp
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::errors::StoreResult;
use crate::metrics::ReconMetrics;
use crate::osint::OsintAggregator;
use crate::store::SubdomainStore;
use crate::types::{Domain, InsertOutcome};
use crate::verify::{verify_candidate, CheckPolicy, DnsPool, Verifier};

const DEFAULT_VERIFY_CONCURRENCY: usize = 8;

/// Runs the full scan of one due domain. Verification failures are absorbed
/// per candidate; a store failure fails the scan, which leaves `last_scan`
/// stale so the scheduler retries the domain next sweep.
pub struct ScanOrchestrator {
    store: Arc<dyn SubdomainStore>,
    aggregator: OsintAggregator,
    verifier: Arc<dyn Verifier>,
    metrics: ReconMetrics,
    verify_concurrency: usize,
}

impl ScanOrchestrator {
    pub fn new(
        store: Arc<dyn SubdomainStore>,
        aggregator: OsintAggregator,
        verifier: Arc<dyn Verifier>,
        metrics: ReconMetrics,
    ) -> Self {
        Self {
            store,
            aggregator,
            verifier,
            metrics,
            verify_concurrency: DEFAULT_VERIFY_CONCURRENCY,
        }
    }

    pub fn with_verify_concurrency(mut self, concurrency: usize) -> Self {
        self.verify_concurrency = concurrency.max(1);
        self
    }

    /// Scan one domain end to end. On success the domain's `last_scan` is
    /// stamped with the completion time; on error it is left unchanged.
    pub async fn scan_domain(&self, domain: &Domain) -> Result<()> {
        info!(domain = %domain.name, sources = domain.sources.len(), "Scanning domain");

        let aggregate = self.aggregator.enumerate(domain).await;
        self.metrics
            .record_source_failures(aggregate.sources_failed as u64);

        // Sorted candidate order fixes the provider rotation sequence for
        // this batch before any check is dispatched.
        let mut candidates: Vec<String> = aggregate.hostnames.into_iter().collect();
        candidates.sort();

        let total = candidates.len() as u64;
        let policy = CheckPolicy::of(domain);

        let results: Vec<StoreResult<bool>> = stream::iter(
            candidates
                .into_iter()
                .enumerate()
                .map(|(index, hostname)| async move {
                    self.process_candidate(domain, index, &hostname, policy).await
                }),
        )
        .buffer_unordered(self.verify_concurrency)
        .collect()
        .await;

        let mut new_count = 0u64;
        let mut store_failure = None;
        for result in results {
            match result {
                Ok(true) => new_count += 1,
                Ok(false) => {}
                Err(err) => store_failure = Some(err),
            }
        }

        self.metrics.record_candidates(total, new_count);

        if let Some(err) = store_failure {
            // Completed candidates keep their results; the missing
            // last_scan stamp is what schedules the retry.
            return Err(err.into());
        }

        self.store.update_last_scan(domain.id, Utc::now()).await?;

        info!(
            domain = %domain.name,
            candidates = total,
            new = new_count,
            "Scan complete"
        );

        Ok(())
    }

    /// Insert one candidate and, if it is new, verify it. Returns whether a
    /// new record was created. Only store errors propagate.
    async fn process_candidate(
        &self,
        domain: &Domain,
        index: usize,
        hostname: &str,
        policy: CheckPolicy,
    ) -> StoreResult<bool> {
        let subdomain_id = match self.store.add_subdomain(domain.id, hostname).await? {
            InsertOutcome::Inserted(id) => id,
            InsertOutcome::AlreadyKnown => {
                // Known hostnames are not re-verified by a fresh scan
                debug!(domain = %domain.name, hostname = %hostname, "Already known, skipping");
                return Ok(false);
            }
        };

        let pool = DnsPool::for_index(index);
        debug!(domain = %domain.name, hostname = %hostname, pool = %pool, "Verifying new candidate");

        let outcome = verify_candidate(self.verifier.as_ref(), hostname, pool, policy).await;

        if outcome.dns_verified {
            self.store.mark_dns_verified(subdomain_id).await?;
            self.metrics.record_dns_verified();
        }
        if let Some(probe) = outcome.http {
            self.store
                .update_http(subdomain_id, probe.status_code, probe.page_size)
                .await?;
            self.metrics.record_http_probed();
        }

        Ok(true)
    }
}
