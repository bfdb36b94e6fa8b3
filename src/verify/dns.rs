// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - DNS Verification
 * A-record checks against fixed public resolver pools
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{ResolveErrorKind, TokioResolver};
use tracing::{debug, warn};

/// Per-lookup resolver timeout and overall lifetime bound
const DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolver pool used for one DNS check. Pools alternate between successive
/// candidates of a batch to spread load across providers; assignment is by
/// candidate index at dispatch time, so rotation stays deterministic even
/// when checks run concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsPool {
    Cloudflare,
    Google,
}

impl DnsPool {
    /// Pool for the i-th candidate of a batch: A, B, A, B, ...
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            DnsPool::Cloudflare
        } else {
            DnsPool::Google
        }
    }

    pub fn ips(&self) -> [IpAddr; 2] {
        match self {
            DnsPool::Cloudflare => [
                IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
                IpAddr::V4(Ipv4Addr::new(1, 0, 0, 1)),
            ],
            DnsPool::Google => [
                IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
                IpAddr::V4(Ipv4Addr::new(8, 8, 4, 4)),
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DnsPool::Cloudflare => "cloudflare",
            DnsPool::Google => "google",
        }
    }
}

impl std::fmt::Display for DnsPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A-record checker holding one resolver per pool
pub struct DnsChecker {
    cloudflare: TokioResolver,
    google: TokioResolver,
}

impl DnsChecker {
    pub fn new() -> Self {
        Self {
            cloudflare: build_resolver(DnsPool::Cloudflare),
            google: build_resolver(DnsPool::Google),
        }
    }

    /// True iff at least one A record resolves through the given pool.
    /// NXDOMAIN, empty answers, timeouts and transport errors all map to
    /// false; timeouts are logged at WARN, the rest at DEBUG. No retry.
    pub async fn check(&self, hostname: &str, pool: DnsPool) -> bool {
        let resolver = match pool {
            DnsPool::Cloudflare => &self.cloudflare,
            DnsPool::Google => &self.google,
        };

        match tokio::time::timeout(DNS_TIMEOUT, resolver.ipv4_lookup(hostname)).await {
            Ok(Ok(lookup)) => lookup.iter().next().is_some(),
            Ok(Err(err)) => {
                if matches!(err.kind(), ResolveErrorKind::Proto(p) if matches!(p.kind(), hickory_resolver::proto::ProtoErrorKind::Timeout)) {
                    warn!(hostname = %hostname, pool = %pool, "DNS lookup timed out");
                } else {
                    debug!(hostname = %hostname, pool = %pool, error = %err, "DNS lookup failed");
                }
                false
            }
            Err(_) => {
                warn!(hostname = %hostname, pool = %pool, "DNS lookup exceeded lifetime bound");
                false
            }
        }
    }
}

impl Default for DnsChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn build_resolver(pool: DnsPool) -> TokioResolver {
    let name_servers = NameServerConfigGroup::from_ips_clear(&pool.ips(), 53, true);
    let config = ResolverConfig::from_parts(None, vec![], name_servers);

    let mut builder =
        TokioResolver::builder_with_config(config, TokioConnectionProvider::default());
    builder.options_mut().timeout = DNS_TIMEOUT;
    builder.options_mut().attempts = 1;
    builder.build()
}
