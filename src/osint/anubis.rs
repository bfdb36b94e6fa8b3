// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Subdomain Index Source
 * Plain JSON list lookups (AnubisDB compatible)
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::HashSet;
use std::time::Duration;

use crate::errors::SourceError;
use crate::osint::normalize_hostname;

pub(crate) const NAME: &str = "anubis";

pub(crate) const TIMEOUT: Duration = Duration::from_secs(20);

/// Look up a domain in a subdomain index that answers with a flat JSON list
/// of hostnames.
pub(crate) async fn query(
    client: &reqwest::Client,
    base_url: &str,
    domain: &str,
) -> Result<HashSet<String>, SourceError> {
    let url = format!("{}/anubis/subdomains/{}", base_url, domain);

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

    let names: Vec<String> = response.json().await.map_err(|e| SourceError::Malformed {
        src: NAME,
        reason: e.to_string(),
    })?;

    Ok(names
        .iter()
        .filter_map(|n| normalize_hostname(n))
        .collect())
}
