// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Recon Domain Model
 * Monitored domains, discovered subdomains and verification policy
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Passive enumeration source identifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    CrtSh,
    HackerTarget,
    UrlScan,
    Anubis,
    Subfinder,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::CrtSh => "crt_sh",
            SourceKind::HackerTarget => "hackertarget",
            SourceKind::UrlScan => "urlscan",
            SourceKind::Anubis => "anubis",
            SourceKind::Subfinder => "subfinder",
        }
    }

    /// Parse a single source name as stored in the domain's source list.
    /// Unknown names are dropped by the caller rather than erroring, so a
    /// stale source list never blocks a scan.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "crt_sh" => Some(SourceKind::CrtSh),
            "hackertarget" => Some(SourceKind::HackerTarget),
            "urlscan" => Some(SourceKind::UrlScan),
            "anubis" => Some(SourceKind::Anubis),
            "subfinder" => Some(SourceKind::Subfinder),
            _ => None,
        }
    }

    /// Parse the comma-joined source list from the store, preserving order
    /// and skipping unknown entries.
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',').filter_map(SourceKind::parse).collect()
    }

    pub fn join_list(sources: &[Self]) -> String {
        sources
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A monitored root domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: i64,
    /// FQDN, lowercase, immutable after creation
    pub name: String,
    /// Enabled passive sources, in configured order
    pub sources: Vec<SourceKind>,
    /// Seconds between scans, always > 0
    pub scan_interval_secs: i64,
    /// Completion time of the last successful scan
    pub last_scan: Option<DateTime<Utc>>,
    pub dns_check: bool,
    pub http_check: bool,
}

impl Domain {
    /// A domain is due when it has never been scanned, or when its interval
    /// has fully elapsed since the last completed scan.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_scan {
            None => true,
            Some(last) => now > last + Duration::seconds(self.scan_interval_secs),
        }
    }
}

/// A discovered hostname under a monitored domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subdomain {
    pub id: i64,
    pub domain_id: i64,
    /// Lowercase, wildcard-stripped, unique per domain
    pub hostname: String,
    pub discovered_at: DateTime<Utc>,
    /// True until an operator acknowledges the finding; the recon core
    /// never clears this
    pub is_new: bool,
    pub dns_verified: bool,
    pub status_code: Option<i32>,
    pub page_size: Option<i64>,
    pub last_checked: Option<DateTime<Utc>>,
}

/// Outcome of an insert-if-absent on (domain, hostname)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// New record created; carries the subdomain id
    Inserted(i64),
    /// Hostname already stored for this domain; no write performed
    AlreadyKnown,
}

/// Result of a successful HTTP probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpProbe {
    /// Final status code after redirects
    pub status_code: u16,
    /// Response body length in bytes
    pub page_size: u64,
}
