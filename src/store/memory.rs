// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - In-Memory Subdomain Store
 * Trait-complete store used by tests and local development
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::config::MIN_SCAN_INTERVAL_SECS;
use crate::errors::{StoreError, StoreResult};
use crate::store::SubdomainStore;
use crate::types::{Domain, InsertOutcome, SourceKind, Subdomain};

#[derive(Debug, Default)]
struct Inner {
    domains: Vec<Domain>,
    subdomains: Vec<Subdomain>,
    next_domain_id: i64,
    next_subdomain_id: i64,
}

/// In-memory store. A single write lock per operation gives the same
/// per-hostname atomicity the database provides via its unique constraint.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a domain directly, bypassing name normalization. Test helper.
    pub async fn insert_domain(&self, domain: Domain) {
        let mut inner = self.inner.write().await;
        inner.next_domain_id = inner.next_domain_id.max(domain.id);
        inner.domains.push(domain);
    }

    /// Fetch a single subdomain by id. Test helper.
    pub async fn get_subdomain(&self, subdomain_id: i64) -> Option<Subdomain> {
        let inner = self.inner.read().await;
        inner
            .subdomains
            .iter()
            .find(|s| s.id == subdomain_id)
            .cloned()
    }

    /// Fetch a single domain by id. Test helper.
    pub async fn get_domain(&self, domain_id: i64) -> Option<Domain> {
        let inner = self.inner.read().await;
        inner.domains.iter().find(|d| d.id == domain_id).cloned()
    }
}

#[async_trait]
impl SubdomainStore for MemoryStore {
    async fn list_domains(&self) -> StoreResult<Vec<Domain>> {
        let inner = self.inner.read().await;
        let mut domains = inner.domains.clone();
        domains.sort_by_key(|d| d.id);
        Ok(domains)
    }

    async fn add_domain(
        &self,
        name: &str,
        sources: &[SourceKind],
        scan_interval_secs: i64,
        dns_check: bool,
        http_check: bool,
    ) -> StoreResult<i64> {
        let mut inner = self.inner.write().await;
        inner.next_domain_id += 1;
        let id = inner.next_domain_id;
        inner.domains.push(Domain {
            id,
            name: name.trim().to_lowercase(),
            sources: sources.to_vec(),
            scan_interval_secs: scan_interval_secs.max(MIN_SCAN_INTERVAL_SECS),
            last_scan: None,
            dns_check,
            http_check,
        });
        Ok(id)
    }

    async fn delete_domain(&self, domain_id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.domains.len();
        inner.domains.retain(|d| d.id != domain_id);
        if inner.domains.len() == before {
            return Err(StoreError::UnknownDomain(domain_id));
        }
        // Cascade, mirroring ON DELETE CASCADE in the database schema
        inner.subdomains.retain(|s| s.domain_id != domain_id);
        Ok(())
    }

    async fn add_subdomain(&self, domain_id: i64, hostname: &str) -> StoreResult<InsertOutcome> {
        let mut inner = self.inner.write().await;
        if !inner.domains.iter().any(|d| d.id == domain_id) {
            return Err(StoreError::UnknownDomain(domain_id));
        }
        if inner
            .subdomains
            .iter()
            .any(|s| s.domain_id == domain_id && s.hostname == hostname)
        {
            return Ok(InsertOutcome::AlreadyKnown);
        }
        inner.next_subdomain_id += 1;
        let id = inner.next_subdomain_id;
        inner.subdomains.push(Subdomain {
            id,
            domain_id,
            hostname: hostname.to_string(),
            discovered_at: Utc::now(),
            is_new: true,
            dns_verified: false,
            status_code: None,
            page_size: None,
            last_checked: None,
        });
        Ok(InsertOutcome::Inserted(id))
    }

    async fn mark_dns_verified(&self, subdomain_id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let sub = inner
            .subdomains
            .iter_mut()
            .find(|s| s.id == subdomain_id)
            .ok_or(StoreError::UnknownSubdomain(subdomain_id))?;
        sub.dns_verified = true;
        sub.last_checked = Some(Utc::now());
        Ok(())
    }

    async fn update_http(
        &self,
        subdomain_id: i64,
        status_code: u16,
        page_size: u64,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let sub = inner
            .subdomains
            .iter_mut()
            .find(|s| s.id == subdomain_id)
            .ok_or(StoreError::UnknownSubdomain(subdomain_id))?;
        sub.status_code = Some(status_code as i32);
        sub.page_size = Some(page_size as i64);
        sub.last_checked = Some(Utc::now());
        Ok(())
    }

    async fn update_last_scan(
        &self,
        domain_id: i64,
        timestamp: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let domain = inner
            .domains
            .iter_mut()
            .find(|d| d.id == domain_id)
            .ok_or(StoreError::UnknownDomain(domain_id))?;
        domain.last_scan = Some(timestamp);
        Ok(())
    }

    async fn list_subdomains(&self, domain_id: i64) -> StoreResult<Vec<Subdomain>> {
        let inner = self.inner.read().await;
        let mut subs: Vec<Subdomain> = inner
            .subdomains
            .iter()
            .filter(|s| s.domain_id == domain_id)
            .cloned()
            .collect();
        subs.sort_by(|a, b| a.hostname.cmp(&b.hostname));
        Ok(subs)
    }

    async fn list_new_subdomains(&self, domain_id: i64) -> StoreResult<Vec<Subdomain>> {
        let inner = self.inner.read().await;
        let mut subs: Vec<Subdomain> = inner
            .subdomains
            .iter()
            .filter(|s| s.domain_id == domain_id && s.is_new)
            .cloned()
            .collect();
        subs.sort_by(|a, b| a.hostname.cmp(&b.hostname));
        Ok(subs)
    }

    async fn mark_seen(&self, subdomain_id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let sub = inner
            .subdomains
            .iter_mut()
            .find(|s| s.id == subdomain_id)
            .ok_or(StoreError::UnknownSubdomain(subdomain_id))?;
        sub.is_new = false;
        Ok(())
    }
}
