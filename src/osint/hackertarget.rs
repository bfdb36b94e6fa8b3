// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Passive DNS Host Search Source
 * CSV-shaped hostname,ip pairs (HackerTarget compatible)
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::HashSet;
use std::time::Duration;

use crate::errors::SourceError;
use crate::osint::normalize_hostname;

pub(crate) const NAME: &str = "hackertarget";

pub(crate) const TIMEOUT: Duration = Duration::from_secs(20);

/// Query a passive-DNS host search endpoint. The response is line-oriented
/// `hostname,ip` text; the API signals problems (quota, unknown domain) in
/// the body with a 200 status, so those sentinels map to an empty result.
pub(crate) async fn query(
    client: &reqwest::Client,
    base_url: &str,
    domain: &str,
) -> Result<HashSet<String>, SourceError> {
    let url = format!("{}/hostsearch/?q={}", base_url, domain);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| SourceError::http(NAME, &e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            src: NAME,
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| SourceError::Malformed {
        src: NAME,
        reason: e.to_string(),
    })?;

    let lowered = body.to_lowercase();
    if lowered.contains("error") || lowered.contains("no records") {
        return Ok(HashSet::new());
    }

    let mut found = HashSet::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() || !line.contains(',') {
            continue;
        }
        let hostname = line.split(',').next().unwrap_or_default();
        if let Some(hostname) = normalize_hostname(hostname) {
            found.insert(hostname);
        }
    }

    Ok(found)
}
