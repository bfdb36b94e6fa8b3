// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - External Enumeration Tool Source
 * Shells out to subfinder and parses its JSON-lines output
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, error};

use crate::errors::SourceError;
use crate::osint::normalize_hostname;

pub(crate) const NAME: &str = "subfinder";

/// The tool fans out to dozens of upstream sources itself
pub(crate) const TIMEOUT: Duration = Duration::from_secs(120);

/// One line of subfinder's `-json` output
#[derive(Debug, Deserialize)]
struct EnumRecord {
    #[serde(default)]
    host: Option<String>,
}

/// Runs the external enumeration binary. A missing binary degrades to an
/// empty contribution rather than failing the scan.
#[derive(Debug, Clone)]
pub struct SubfinderRunner {
    binary: String,
}

impl SubfinderRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Probe the binary with `-version`. Covers both "not installed" and
    /// "path points at something that is not subfinder".
    pub async fn is_installed(&self) -> bool {
        match Command::new(&self.binary).arg("-version").output().await {
            Ok(output) => output.status.success(),
            Err(_) => false,
        }
    }

    pub(crate) async fn query(&self, domain: &str) -> Result<HashSet<String>, SourceError> {
        if !self.is_installed().await {
            error!(
                binary = %self.binary,
                "subfinder is not installed; install with: \
                 go install -v github.com/projectdiscovery/subfinder/v2/cmd/subfinder@latest"
            );
            return Err(SourceError::ToolMissing {
                tool: self.binary.clone(),
            });
        }

        debug!(domain = %domain, "Running subfinder");

        let output = Command::new(&self.binary)
            .args(["-d", domain, "-json", "-silent"])
            .output()
            .await
            .map_err(|e| SourceError::ToolFailed {
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(SourceError::ToolFailed {
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut found = HashSet::new();
        for line in stdout.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            // One JSON object per line; unparseable lines are skipped
            let Ok(record) = serde_json::from_str::<EnumRecord>(line) else {
                continue;
            };
            if let Some(hostname) = record.host.and_then(|h| normalize_hostname(&h)) {
                found.insert(hostname);
            }
        }

        Ok(found)
    }
}
