// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Verification Pipeline
 * DNS and HTTP checks composed behind the per-domain policy gate
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

pub mod dns;
pub mod http;

pub use dns::{DnsChecker, DnsPool};
pub use http::HttpChecker;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{Domain, HttpProbe};

/// Verification seam. The production implementation talks to real resolvers
/// and targets; tests substitute scripted outcomes.
#[async_trait]
pub trait Verifier: Send + Sync {
    /// True iff the hostname currently resolves to at least one A record
    /// through the given pool.
    async fn dns_check(&self, hostname: &str, pool: DnsPool) -> bool;

    /// HTTPS-then-HTTP probe; None when neither scheme answers.
    async fn http_check(&self, hostname: &str) -> Option<HttpProbe>;
}

/// Which checks run for a candidate, taken from the owning domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckPolicy {
    pub dns: bool,
    pub http: bool,
}

impl CheckPolicy {
    pub fn of(domain: &Domain) -> Self {
        Self {
            dns: domain.dns_check,
            http: domain.http_check,
        }
    }
}

/// Result of running the policy gate for one candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// True iff the DNS check ran and resolved
    pub dns_verified: bool,
    /// Present iff an HTTP check ran and a scheme answered
    pub http: Option<HttpProbe>,
}

/// Run the policy gate for one candidate:
///
/// | dns | http | behavior                                  |
/// |-----|------|-------------------------------------------|
/// | yes | yes  | DNS first; HTTP only if DNS resolved      |
/// | yes | no   | DNS only                                  |
/// | no  | yes  | HTTP unconditionally                      |
/// | no  | no   | nothing; candidate stays unverified       |
///
/// A check failing only affects this candidate's outcome, never the batch.
pub async fn verify_candidate(
    verifier: &dyn Verifier,
    hostname: &str,
    pool: DnsPool,
    policy: CheckPolicy,
) -> VerificationOutcome {
    let mut outcome = VerificationOutcome::default();

    if policy.dns {
        if verifier.dns_check(hostname, pool).await {
            outcome.dns_verified = true;
            if policy.http {
                outcome.http = verifier.http_check(hostname).await;
            }
        }
    } else if policy.http {
        outcome.http = verifier.http_check(hostname).await;
    }

    outcome
}

/// Production pipeline: hickory-resolver pools + reqwest probe client
pub struct VerifyPipeline {
    dns: DnsChecker,
    http: HttpChecker,
}

impl VerifyPipeline {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dns: DnsChecker::new(),
            http: HttpChecker::new()?,
        })
    }
}

#[async_trait]
impl Verifier for VerifyPipeline {
    async fn dns_check(&self, hostname: &str, pool: DnsPool) -> bool {
        self.dns.check(hostname, pool).await
    }

    async fn http_check(&self, hostname: &str) -> Option<HttpProbe> {
        self.http.probe(hostname).await
    }
}
