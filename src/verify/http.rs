// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - HTTP Verification
 * HTTPS-first probe with plaintext fallback
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::types::HttpProbe;

/// Per-scheme probe timeout
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_REDIRECTS: usize = 10;

/// Probes candidate hostnames over HTTPS, falling back to HTTP.
///
/// SECURITY TRADE-OFF: certificate validation is disabled on this client,
/// deliberately. The probe's job is to profile what is reachable on the
/// attack surface — hosts with self-signed, expired or mismatched
/// certificates are exactly the ones worth recording. Nothing sensitive is
/// ever sent on these requests, and this client must not be reused for
/// anything that is not a probe.
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .danger_accept_invalid_certs(true)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("lonkero-recon/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create probe HTTP client")?;

        Ok(Self { client })
    }

    /// Try `https://hostname`, then `http://hostname`. The first scheme
    /// that answers wins; redirects are followed and the final status code
    /// and body size are recorded. None if neither scheme answers.
    pub async fn probe(&self, hostname: &str) -> Option<HttpProbe> {
        for scheme in ["https", "http"] {
            let url = format!("{}://{}", scheme, hostname);

            let response = match self.client.get(&url).send().await {
                Ok(response) => response,
                Err(err) => {
                    // TLS failure, refused connection or timeout: fall
                    // through to the next scheme
                    debug!(url = %url, error = %err, "Probe attempt failed");
                    continue;
                }
            };

            let status_code = response.status().as_u16();
            let body = match response.bytes().await {
                Ok(body) => body,
                Err(err) => {
                    debug!(url = %url, error = %err, "Failed to read probe body");
                    continue;
                }
            };

            let probe = HttpProbe {
                status_code,
                page_size: body.len() as u64,
            };
            info!(
                hostname = %hostname,
                scheme = scheme,
                status = probe.status_code,
                size = probe.page_size,
                "HTTP probe complete"
            );
            return Some(probe);
        }

        None
    }
}
