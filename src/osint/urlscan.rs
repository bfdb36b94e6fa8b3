// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - URL Scan Archive Source
 * Hostnames from scan-archive search results (urlscan.io compatible)
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::SourceError;
use crate::osint::normalize_hostname;

pub(crate) const NAME: &str = "urlscan";

pub(crate) const TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    page: Option<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    domain: Option<String>,
}

/// Search the scan archive for `domain:<name>` and collect the page domain
/// of every result. Records without a page domain are skipped.
pub(crate) async fn query(
    client: &reqwest::Client,
    base_url: &str,
    domain: &str,
) -> Result<HashSet<String>, SourceError> {
    let url = format!("{}/api/v1/search/?q=domain:{}", base_url, domain);

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

    let search: SearchResponse = response.json().await.map_err(|e| SourceError::Malformed {
        src: NAME,
        reason: e.to_string(),
    })?;

    let found = search
        .results
        .into_iter()
        .filter_map(|r| r.page)
        .filter_map(|p| p.domain)
        .filter_map(|d| normalize_hostname(&d))
        .collect();

    Ok(found)
}
