// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - OSINT Aggregator
 * Concurrent multi-source passive enumeration with per-source isolation
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

pub mod anubis;
pub mod crtsh;
pub mod hackertarget;
pub mod subfinder;
pub mod urlscan;

pub use subfinder::SubfinderRunner;

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::future;
use tracing::{debug, warn};

use crate::errors::SourceError;
use crate::types::{Domain, SourceKind};

/// Normalize one extracted name: trim, fold case, drop wildcards and
/// empties. Every hostname that leaves the aggregator has passed through
/// here.
pub(crate) fn normalize_hostname(raw: &str) -> Option<String> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() || name.starts_with('*') {
        return None;
    }
    Some(name)
}

/// Base URLs of the HTTP-backed sources. Overridable so tests can point the
/// aggregator at a local mock.
#[derive(Debug, Clone)]
pub struct SourceEndpoints {
    pub crtsh: String,
    pub hackertarget: String,
    pub urlscan: String,
    pub anubis: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            crtsh: "https://crt.sh".to_string(),
            hackertarget: "https://api.hackertarget.com".to_string(),
            urlscan: "https://urlscan.io".to_string(),
            anubis: "https://jldc.me".to_string(),
        }
    }
}

/// Union of all successful source contributions for one domain
#[derive(Debug, Default)]
pub struct AggregateResult {
    /// Deduplicated, normalized hostnames
    pub hostnames: HashSet<String>,
    pub sources_queried: usize,
    pub sources_failed: usize,
}

impl AggregateResult {
    /// True when at least one source was queried and none succeeded.
    /// Callers treat this identically to zero findings; it exists for
    /// logging and metrics only.
    pub fn all_failed(&self) -> bool {
        self.sources_queried > 0 && self.sources_failed == self.sources_queried
    }
}

/// Queries every enabled passive source for a domain and merges the results.
///
/// Isolation contract: one source failing — transport error, bad payload,
/// timeout, missing binary — is logged and contributes nothing; it never
/// aborts the other sources or the overall call. All sources run
/// concurrently, each bounded by its own timeout.
pub struct OsintAggregator {
    client: reqwest::Client,
    endpoints: SourceEndpoints,
    subfinder: SubfinderRunner,
}

impl OsintAggregator {
    pub fn new(subfinder: SubfinderRunner) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lonkero-recon/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create OSINT HTTP client")?;

        Ok(Self {
            client,
            endpoints: SourceEndpoints::default(),
            subfinder,
        })
    }

    /// Override source base URLs (tests)
    pub fn with_endpoints(mut self, endpoints: SourceEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Query all of the domain's enabled sources and return the union.
    /// All-failed is not an error: the result is empty and flagged.
    pub async fn enumerate(&self, domain: &Domain) -> AggregateResult {
        let queries = domain
            .sources
            .iter()
            .map(|kind| self.query_source(*kind, &domain.name));
        let results = future::join_all(queries).await;

        let mut aggregate = AggregateResult {
            sources_queried: results.len(),
            ..AggregateResult::default()
        };

        for (kind, result) in results {
            match result {
                Ok(found) => {
                    debug!(
                        domain = %domain.name,
                        source = %kind,
                        count = found.len(),
                        "Source query complete"
                    );
                    aggregate.hostnames.extend(found);
                }
                Err(err) => {
                    aggregate.sources_failed += 1;
                    warn!(domain = %domain.name, source = %kind, error = %err, "Source query failed");
                }
            }
        }

        if aggregate.all_failed() {
            warn!(
                domain = %domain.name,
                sources = aggregate.sources_queried,
                "All enumeration sources failed; treating as zero findings"
            );
        }

        aggregate
    }

    async fn query_source(
        &self,
        kind: SourceKind,
        domain: &str,
    ) -> (SourceKind, Result<HashSet<String>, SourceError>) {
        let result = match kind {
            SourceKind::CrtSh => {
                bounded(
                    kind,
                    crtsh::TIMEOUT,
                    crtsh::query(&self.client, &self.endpoints.crtsh, domain),
                )
                .await
            }
            SourceKind::HackerTarget => {
                bounded(
                    kind,
                    hackertarget::TIMEOUT,
                    hackertarget::query(&self.client, &self.endpoints.hackertarget, domain),
                )
                .await
            }
            SourceKind::UrlScan => {
                bounded(
                    kind,
                    urlscan::TIMEOUT,
                    urlscan::query(&self.client, &self.endpoints.urlscan, domain),
                )
                .await
            }
            SourceKind::Anubis => {
                bounded(
                    kind,
                    anubis::TIMEOUT,
                    anubis::query(&self.client, &self.endpoints.anubis, domain),
                )
                .await
            }
            SourceKind::Subfinder => {
                bounded(kind, subfinder::TIMEOUT, self.subfinder.query(domain)).await
            }
        };

        (kind, result)
    }
}

/// Bound one source call so a hung source cannot stall the batch.
async fn bounded<F>(
    kind: SourceKind,
    timeout: Duration,
    query: F,
) -> Result<HashSet<String>, SourceError>
where
    F: Future<Output = Result<HashSet<String>, SourceError>>,
{
    match tokio::time::timeout(timeout, query).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout {
            src: kind.as_str(),
            timeout,
        }),
    }
}
