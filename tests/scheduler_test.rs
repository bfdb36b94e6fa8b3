// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scheduler Tests
 * Due-ness filtering, per-domain isolation and shutdown
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lonkero_recon::errors::{StoreError, StoreResult};
use lonkero_recon::metrics::ReconMetrics;
use lonkero_recon::orchestrator::ScanOrchestrator;
use lonkero_recon::osint::{OsintAggregator, SourceEndpoints, SubfinderRunner};
use lonkero_recon::scheduler::Scheduler;
use lonkero_recon::store::{MemoryStore, SubdomainStore};
use lonkero_recon::types::{Domain, HttpProbe, InsertOutcome, SourceKind, Subdomain};
use lonkero_recon::verify::{DnsPool, Verifier};
use tokio::sync::watch;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Verifier that always resolves and never probes
struct AlwaysResolves;

#[async_trait]
impl Verifier for AlwaysResolves {
    async fn dns_check(&self, _hostname: &str, _pool: DnsPool) -> bool {
        true
    }

    async fn http_check(&self, _hostname: &str) -> Option<HttpProbe> {
        None
    }
}

/// Store wrapper that rejects subdomain inserts for one domain, leaving the
/// rest of the store fully functional
struct PoisonedDomainStore {
    inner: Arc<MemoryStore>,
    poisoned_domain: i64,
}

#[async_trait]
impl SubdomainStore for PoisonedDomainStore {
    async fn list_domains(&self) -> StoreResult<Vec<Domain>> {
        self.inner.list_domains().await
    }

    async fn add_domain(
        &self,
        name: &str,
        sources: &[SourceKind],
        scan_interval_secs: i64,
        dns_check: bool,
        http_check: bool,
    ) -> StoreResult<i64> {
        self.inner
            .add_domain(name, sources, scan_interval_secs, dns_check, http_check)
            .await
    }

    async fn delete_domain(&self, domain_id: i64) -> StoreResult<()> {
        self.inner.delete_domain(domain_id).await
    }

    async fn add_subdomain(&self, domain_id: i64, hostname: &str) -> StoreResult<InsertOutcome> {
        if domain_id == self.poisoned_domain {
            return Err(StoreError::QueryFailed {
                reason: "simulated outage".to_string(),
            });
        }
        self.inner.add_subdomain(domain_id, hostname).await
    }

    async fn mark_dns_verified(&self, subdomain_id: i64) -> StoreResult<()> {
        self.inner.mark_dns_verified(subdomain_id).await
    }

    async fn update_http(
        &self,
        subdomain_id: i64,
        status_code: u16,
        page_size: u64,
    ) -> StoreResult<()> {
        self.inner.update_http(subdomain_id, status_code, page_size).await
    }

    async fn update_last_scan(
        &self,
        domain_id: i64,
        timestamp: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.inner.update_last_scan(domain_id, timestamp).await
    }

    async fn list_subdomains(&self, domain_id: i64) -> StoreResult<Vec<Subdomain>> {
        self.inner.list_subdomains(domain_id).await
    }

    async fn list_new_subdomains(&self, domain_id: i64) -> StoreResult<Vec<Subdomain>> {
        self.inner.list_new_subdomains(domain_id).await
    }

    async fn mark_seen(&self, subdomain_id: i64) -> StoreResult<()> {
        self.inner.mark_seen(subdomain_id).await
    }
}

fn domain(id: i64, name: &str, sources: Vec<SourceKind>, last_scan: Option<DateTime<Utc>>) -> Domain {
    Domain {
        id,
        name: name.to_string(),
        sources,
        scan_interval_secs: 3600,
        last_scan,
        dns_check: true,
        http_check: false,
    }
}

fn aggregator_for(mock_server: &MockServer) -> OsintAggregator {
    let uri = mock_server.uri();
    OsintAggregator::new(SubfinderRunner::new("subfinder-test-missing-binary"))
        .unwrap()
        .with_endpoints(SourceEndpoints {
            crtsh: uri.clone(),
            hackertarget: uri.clone(),
            urlscan: uri.clone(),
            anubis: uri,
        })
}

/// Run the scheduler until the shutdown flag flips, bounded by a timeout so
/// a hung loop fails the test instead of wedging it
async fn run_one_sweep(scheduler: Scheduler, shutdown_tx: watch::Sender<bool>) {
    let handle = tokio::spawn(scheduler.run());
    tokio::time::sleep(Duration::from_millis(300)).await;
    shutdown_tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("scheduler did not stop after shutdown signal")
        .unwrap();
}

#[tokio::test]
async fn sweep_scans_due_domains_and_skips_fresh_ones() {
    let mock_server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());

    let fresh_stamp = Utc::now();
    store.insert_domain(domain(1, "due.example.com", vec![], None)).await;
    store
        .insert_domain(domain(2, "fresh.example.com", vec![], Some(fresh_stamp)))
        .await;

    let metrics = ReconMetrics::new();
    let orchestrator = ScanOrchestrator::new(
        Arc::clone(&store) as Arc<dyn SubdomainStore>,
        aggregator_for(&mock_server),
        Arc::new(AlwaysResolves),
        metrics.clone(),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = Scheduler::new(
        Arc::clone(&store) as Arc<dyn SubdomainStore>,
        orchestrator,
        metrics.clone(),
        Duration::from_secs(3600),
        shutdown_rx,
    );

    run_one_sweep(scheduler, shutdown_tx).await;

    // Never-scanned domain got a completion stamp
    assert!(store.get_domain(1).await.unwrap().last_scan.is_some());
    // Fresh domain was not touched
    assert_eq!(
        store.get_domain(2).await.unwrap().last_scan,
        Some(fresh_stamp)
    );
    assert_eq!(metrics.snapshot().scans_completed, 1);
}

#[tokio::test]
async fn failing_domain_does_not_stop_the_sweep() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name_value": "api.a.example.com" }
        ])))
        .mount(&mock_server)
        .await;

    let inner = Arc::new(MemoryStore::new());
    inner
        .insert_domain(domain(1, "a.example.com", vec![SourceKind::CrtSh], None))
        .await;
    inner.insert_domain(domain(2, "b.example.com", vec![], None)).await;

    let store: Arc<dyn SubdomainStore> = Arc::new(PoisonedDomainStore {
        inner: Arc::clone(&inner),
        poisoned_domain: 1,
    });

    let metrics = ReconMetrics::new();
    let orchestrator = ScanOrchestrator::new(
        Arc::clone(&store),
        aggregator_for(&mock_server),
        Arc::new(AlwaysResolves),
        metrics.clone(),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = Scheduler::new(
        Arc::clone(&store),
        orchestrator,
        metrics.clone(),
        Duration::from_secs(3600),
        shutdown_rx,
    );

    run_one_sweep(scheduler, shutdown_tx).await;

    // Domain A failed mid-batch: no stamp, retried when due again
    assert!(inner.get_domain(1).await.unwrap().last_scan.is_none());
    // Domain B in the same sweep completed normally
    assert!(inner.get_domain(2).await.unwrap().last_scan.is_some());

    let snap = metrics.snapshot();
    assert_eq!(snap.scans_failed, 1);
    assert_eq!(snap.scans_completed, 1);
}

#[tokio::test]
async fn shutdown_signal_stops_the_loop_promptly() {
    let store = Arc::new(MemoryStore::new());
    let metrics = ReconMetrics::new();

    let orchestrator = ScanOrchestrator::new(
        Arc::clone(&store) as Arc<dyn SubdomainStore>,
        OsintAggregator::new(SubfinderRunner::new("subfinder-test-missing-binary")).unwrap(),
        Arc::new(AlwaysResolves),
        metrics.clone(),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = Scheduler::new(
        Arc::clone(&store) as Arc<dyn SubdomainStore>,
        orchestrator,
        metrics,
        // Long sleep: shutdown must interrupt it, not wait it out
        Duration::from_secs(3600),
        shutdown_rx,
    );

    let handle = tokio::spawn(scheduler.run());
    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown_tx.send(true).unwrap();

    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("scheduler did not stop after shutdown signal")
        .unwrap();
}
