// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Recon Error Types
 * Explicit failure taxonomy for sources, verification and the store
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use std::time::Duration;
use thiserror::Error;

/// Per-source query failures. Each variant maps to exactly one isolation
/// decision in the aggregator: log and contribute an empty set. Only store
/// errors are allowed to escape a component boundary; source and
/// verification failures are absorbed where they happen.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP transport error for {src}: {reason}")]
    Http { src: &'static str, reason: String },

    #[error("{src} returned HTTP {status}")]
    Status { src: &'static str, status: u16 },

    #[error("Malformed {src} response: {reason}")]
    Malformed { src: &'static str, reason: String },

    #[error("{src} timed out after {timeout:?}")]
    Timeout {
        src: &'static str,
        timeout: Duration,
    },

    #[error("Enumeration tool not available: {tool}")]
    ToolMissing { tool: String },

    #[error("Enumeration tool failed: {reason}")]
    ToolFailed { reason: String },
}

impl SourceError {
    pub fn http(source: &'static str, err: &reqwest::Error) -> Self {
        SourceError::Http {
            src: source,
            reason: err.to_string(),
        }
    }
}

/// Store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store connection failed: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("Unknown domain id: {0}")]
    UnknownDomain(i64),

    #[error("Unknown subdomain id: {0}")]
    UnknownSubdomain(i64),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        StoreError::QueryFailed {
            reason: err.to_string(),
        }
    }
}

impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StoreError::ConnectionFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
