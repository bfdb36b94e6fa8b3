// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - OSINT Aggregator Tests
 * Source isolation, normalization and union semantics
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::HashSet;

use lonkero_recon::osint::{OsintAggregator, SourceEndpoints, SubfinderRunner};
use lonkero_recon::types::{Domain, SourceKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn domain(sources: Vec<SourceKind>) -> Domain {
    Domain {
        id: 1,
        name: "example.com".to_string(),
        sources,
        scan_interval_secs: 3600,
        last_scan: None,
        dns_check: true,
        http_check: true,
    }
}

fn aggregator(mock_server: &MockServer) -> OsintAggregator {
    let uri = mock_server.uri();
    OsintAggregator::new(SubfinderRunner::new("subfinder-test-missing-binary"))
        .unwrap()
        .with_endpoints(SourceEndpoints {
            crtsh: uri.clone(),
            hackertarget: uri.clone(),
            urlscan: uri.clone(),
            anubis: uri,
        })
}

fn names(aggregate: &HashSet<String>) -> Vec<&str> {
    let mut list: Vec<&str> = aggregate.iter().map(String::as_str).collect();
    list.sort();
    list
}

#[tokio::test]
async fn crtsh_extraction_folds_case_and_drops_wildcards() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name_value": "api.example.com\n*.example.com" },
            { "name_value": "API.example.com" },
            { "issuer_name": "no name_value field" }
        ])))
        .mount(&mock_server)
        .await;

    let result = aggregator(&mock_server)
        .enumerate(&domain(vec![SourceKind::CrtSh]))
        .await;

    assert_eq!(names(&result.hostnames), vec!["api.example.com"]);
    assert_eq!(result.sources_failed, 0);
}

#[tokio::test]
async fn union_of_surviving_sources_when_one_fails() {
    let mock_server = MockServer::start().await;

    // certificate transparency source is down
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hostsearch/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("www.example.com,93.184.216.34\nmail.example.com,93.184.216.35"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/anubis/subdomains/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            "www.example.com",
            "dev.example.com"
        ])))
        .mount(&mock_server)
        .await;

    let result = aggregator(&mock_server)
        .enumerate(&domain(vec![
            SourceKind::CrtSh,
            SourceKind::HackerTarget,
            SourceKind::Anubis,
        ]))
        .await;

    assert_eq!(
        names(&result.hostnames),
        vec!["dev.example.com", "mail.example.com", "www.example.com"]
    );
    assert_eq!(result.sources_queried, 3);
    assert_eq!(result.sources_failed, 1);
    assert!(!result.all_failed());
}

#[tokio::test]
async fn all_sources_failing_yields_empty_flagged_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let result = aggregator(&mock_server)
        .enumerate(&domain(vec![SourceKind::CrtSh, SourceKind::UrlScan]))
        .await;

    assert!(result.hostnames.is_empty());
    assert_eq!(result.sources_failed, 2);
    assert!(result.all_failed());
}

#[tokio::test]
async fn hackertarget_error_sentinel_is_empty_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hostsearch/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("error check your search query"))
        .mount(&mock_server)
        .await;

    let result = aggregator(&mock_server)
        .enumerate(&domain(vec![SourceKind::HackerTarget]))
        .await;

    assert!(result.hostnames.is_empty());
    assert_eq!(result.sources_failed, 0);
    assert!(!result.all_failed());
}

#[tokio::test]
async fn urlscan_records_without_page_domain_are_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "page": { "domain": "App.example.com" } },
                { "page": { "url": "https://example.com/x" } },
                { "task": { "visibility": "public" } }
            ]
        })))
        .mount(&mock_server)
        .await;

    let result = aggregator(&mock_server)
        .enumerate(&domain(vec![SourceKind::UrlScan]))
        .await;

    assert_eq!(names(&result.hostnames), vec!["app.example.com"]);
}

#[tokio::test]
async fn malformed_json_is_isolated_to_its_source() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/anubis/subdomains/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["ok.example.com"])))
        .mount(&mock_server)
        .await;

    let result = aggregator(&mock_server)
        .enumerate(&domain(vec![SourceKind::CrtSh, SourceKind::Anubis]))
        .await;

    assert_eq!(names(&result.hostnames), vec!["ok.example.com"]);
    assert_eq!(result.sources_failed, 1);
}

#[tokio::test]
async fn missing_enumeration_binary_degrades_to_empty() {
    let mock_server = MockServer::start().await;

    let result = aggregator(&mock_server)
        .enumerate(&domain(vec![SourceKind::Subfinder]))
        .await;

    assert!(result.hostnames.is_empty());
    assert_eq!(result.sources_queried, 1);
    assert_eq!(result.sources_failed, 1);
}

#[tokio::test]
async fn no_sources_enabled_queries_nothing() {
    let mock_server = MockServer::start().await;

    let result = aggregator(&mock_server).enumerate(&domain(vec![])).await;

    assert!(result.hostnames.is_empty());
    assert_eq!(result.sources_queried, 0);
    assert!(!result.all_failed());
}
