// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Recon Metrics
 * In-process counters for scans, discoveries and verification outcomes
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Counters shared across scheduler, orchestrator and pipeline. Cheap to
/// clone; all counters are process-lifetime totals.
#[derive(Debug, Clone, Default)]
pub struct ReconMetrics {
    scans_completed: Arc<AtomicU64>,
    scans_failed: Arc<AtomicU64>,
    candidates_discovered: Arc<AtomicU64>,
    candidates_new: Arc<AtomicU64>,
    dns_verified: Arc<AtomicU64>,
    http_probed: Arc<AtomicU64>,
    source_failures: Arc<AtomicU64>,
}

impl ReconMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_scan_completed(&self) {
        self.scans_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scan_failed(&self) {
        self.scans_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_candidates(&self, discovered: u64, new: u64) {
        self.candidates_discovered
            .fetch_add(discovered, Ordering::Relaxed);
        self.candidates_new.fetch_add(new, Ordering::Relaxed);
    }

    pub fn record_dns_verified(&self) {
        self.dns_verified.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_http_probed(&self) {
        self.http_probed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_source_failures(&self, count: u64) {
        self.source_failures.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            scans_completed: self.scans_completed.load(Ordering::Relaxed),
            scans_failed: self.scans_failed.load(Ordering::Relaxed),
            candidates_discovered: self.candidates_discovered.load(Ordering::Relaxed),
            candidates_new: self.candidates_new.load(Ordering::Relaxed),
            dns_verified: self.dns_verified.load(Ordering::Relaxed),
            http_probed: self.http_probed.load(Ordering::Relaxed),
            source_failures: self.source_failures.load(Ordering::Relaxed),
        }
    }

    /// Emit the current totals. Called by the scheduler after each sweep.
    pub fn log_summary(&self) {
        let snap = self.snapshot();
        info!(
            scans_completed = snap.scans_completed,
            scans_failed = snap.scans_failed,
            candidates_discovered = snap.candidates_discovered,
            candidates_new = snap.candidates_new,
            dns_verified = snap.dns_verified,
            http_probed = snap.http_probed,
            source_failures = snap.source_failures,
            "Recon totals"
        );
    }
}

/// Point-in-time view of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub scans_completed: u64,
    pub scans_failed: u64,
    pub candidates_discovered: u64,
    pub candidates_new: u64,
    pub dns_verified: u64,
    pub http_probed: u64,
    pub source_failures: u64,
}
