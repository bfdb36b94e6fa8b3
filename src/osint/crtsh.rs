// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Certificate Transparency Source
 * Subdomains from CT log search (crt.sh compatible)
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::SourceError;
use crate::osint::normalize_hostname;

pub(crate) const NAME: &str = "crt_sh";

/// CT searches are slow on large domains
pub(crate) const TIMEOUT: Duration = Duration::from_secs(40);

/// One certificate entry. Only the SAN field matters; anything else in the
/// payload is ignored, and a missing SAN field skips the entry.
#[derive(Debug, Deserialize)]
struct CertEntry {
    #[serde(default)]
    name_value: Option<String>,
}

/// Query a CT search endpoint for `%.domain` and extract every
/// subject-alternative-name line. Wildcard entries are dropped.
pub(crate) async fn query(
    client: &reqwest::Client,
    base_url: &str,
    domain: &str,
) -> Result<HashSet<String>, SourceError> {
    let url = format!("{}/?q=%.{}&output=json", base_url, domain);

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

    let entries: Vec<CertEntry> = response.json().await.map_err(|e| SourceError::Malformed {
        src: NAME,
        reason: e.to_string(),
    })?;

    let mut found = HashSet::new();
    for entry in entries {
        let Some(name_value) = entry.name_value else {
            continue;
        };
        // SANs arrive newline-joined in a single field
        for name in name_value.lines() {
            if let Some(hostname) = normalize_hostname(name) {
                found.insert(hostname);
            }
        }
    }

    Ok(found)
}
