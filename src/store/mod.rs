// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Subdomain Store
 * Persistence seam consumed by the recon core and the dashboard
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{PgStore, PgStoreConfig};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::StoreResult;
use crate::types::{Domain, InsertOutcome, SourceKind, Subdomain};

/// Store operations the recon core and the presentation layer depend on.
///
/// Write operations are atomic per hostname: `add_subdomain` either creates
/// the record or reports it as already known, never both, even under
/// concurrent batches. Field updates are idempotent overwrites.
#[async_trait]
pub trait SubdomainStore: Send + Sync {
    /// All monitored domains, ordered by id. No filtering.
    async fn list_domains(&self) -> StoreResult<Vec<Domain>>;

    /// Register a domain for monitoring. The name is lowercased and the
    /// interval clamped to the configured minimum. Operator-facing; the
    /// scan loop never calls this.
    async fn add_domain(
        &self,
        name: &str,
        sources: &[SourceKind],
        scan_interval_secs: i64,
        dns_check: bool,
        http_check: bool,
    ) -> StoreResult<i64>;

    /// Remove a domain and, by cascade, all of its subdomains.
    /// Operator-facing; the scan loop never calls this.
    async fn delete_domain(&self, domain_id: i64) -> StoreResult<()>;

    /// Insert a hostname for a domain if it is not already present.
    async fn add_subdomain(&self, domain_id: i64, hostname: &str) -> StoreResult<InsertOutcome>;

    /// Record a successful A-record resolution and stamp `last_checked`.
    async fn mark_dns_verified(&self, subdomain_id: i64) -> StoreResult<()>;

    /// Record HTTP probe results and stamp `last_checked`.
    async fn update_http(
        &self,
        subdomain_id: i64,
        status_code: u16,
        page_size: u64,
    ) -> StoreResult<()>;

    /// Stamp a domain's last completed scan time.
    async fn update_last_scan(
        &self,
        domain_id: i64,
        timestamp: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// All subdomains of a domain, ordered by hostname.
    async fn list_subdomains(&self, domain_id: i64) -> StoreResult<Vec<Subdomain>>;

    /// Subdomains not yet acknowledged by an operator.
    async fn list_new_subdomains(&self, domain_id: i64) -> StoreResult<Vec<Subdomain>>;

    /// Operator acknowledgement: clear the `is_new` flag.
    async fn mark_seen(&self, subdomain_id: i64) -> StoreResult<()>;
}
