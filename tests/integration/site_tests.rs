//! End-to-end crawls of a small mock website
//!
//! The site has five internal pages plus an index, a stylesheet and two
//! broken pages: `/page3.html` is missing (404) and `/page4.html` fails
//! with a server error (500).

use crate::support::{html_page, serve, test_config};
use dead_seeker::output::{CrawlStatistics, LoggingObserver};
use dead_seeker::{DeadSeeker, FetchResult, SeekerConfig};
use reqwest::StatusCode;
use std::sync::Mutex;
use wiremock::{MockServer, ResponseTemplate};

async fn mock_site() -> MockServer {
    let server = MockServer::start().await;

    serve(
        &server,
        "/",
        html_page(&[
            "/page1.html",
            "page2.html",
            "https://www.google.com/",
            "mailto:someone@example.com",
            "/css/site.css",
        ]),
    )
    .await;
    serve(
        &server,
        "/page1.html",
        html_page(&["/subpages/subpage1.html", "/page3.html", "/page2.html"]),
    )
    .await;
    serve(
        &server,
        "/page2.html",
        html_page(&["/subpages/subpage2.html", "/page4.html", "/page1.html"]),
    )
    .await;
    serve(
        &server,
        "/subpages/subpage1.html",
        html_page(&["subpage2.html", "../index.html"]),
    )
    .await;
    serve(
        &server,
        "/subpages/subpage2.html",
        html_page(&["../index.html", "/page1.html"]),
    )
    .await;
    serve(&server, "/index.html", html_page(&["/page1.html", "/page2.html"])).await;
    serve(
        &server,
        "/css/site.css",
        ResponseTemplate::new(200)
            .set_body_raw("body { color: black; }", "text/css"),
    )
    .await;
    serve(&server, "/page4.html", ResponseTemplate::new(500)).await;

    server
}

fn config_excluding(prefixes: &[&str]) -> SeekerConfig {
    let mut config = test_config();
    config.add_exclude_prefix(prefixes.iter().copied());
    config
}

fn sorted_urls(results: &[FetchResult]) -> Vec<String> {
    let mut urls: Vec<String> = results.iter().map(|r| r.url().to_string()).collect();
    urls.sort();
    urls
}

#[tokio::test]
async fn test_broken_pages_are_reported() {
    let server = mock_site().await;
    let base = server.uri();

    let seeker = DeadSeeker::new(config_excluding(&["https://www.google.com"]));
    let results = seeker.seek([base.as_str()], None).await.unwrap();

    assert_eq!(
        sorted_urls(&results.failures),
        vec![format!("{}/page3.html", base), format!("{}/page4.html", base)]
    );
    assert_eq!(results.successes.len(), 7);
    assert!(!results.is_healthy());

    for failure in &results.failures {
        let expected = if failure.url().ends_with("page3.html") {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        assert_eq!(failure.status, Some(expected));
        assert_eq!(failure.error.as_ref().map(|e| e.kind()), Some("HttpResponseError"));
    }
}

#[tokio::test]
async fn test_excluding_broken_pages_gives_healthy_site() {
    let server = mock_site().await;

    let seeker = DeadSeeker::new(config_excluding(&[
        "https://www.google.com",
        "/page3.html",
        "/page4.html",
    ]));
    let results = seeker.seek([server.uri()], None).await.unwrap();

    assert!(results.is_healthy(), "unexpected failures: {:?}", sorted_urls(&results.failures));
    assert_eq!(results.successes.len(), 7);
}

#[tokio::test]
async fn test_resolved_links_can_be_filtered_by_origin() {
    let server = mock_site().await;
    let base = server.uri();

    let mut config = test_config();
    config.resolve_before_filter = true;
    config.include_prefix = vec![base.clone()];
    config.exclude_suffix = vec!["/page3.html".to_string(), "/page4.html".to_string()];

    let results = DeadSeeker::new(config).seek([base.as_str()], None).await.unwrap();

    assert!(results.is_healthy());
    assert_eq!(results.successes.len(), 7);
    assert!(results
        .successes
        .iter()
        .all(|result| result.url().starts_with(&base)));
}

#[tokio::test]
async fn test_failure_lines_show_navigation_path() {
    let server = mock_site().await;
    let base = server.uri();

    let lines = Mutex::new(Vec::new());
    let logger = LoggingObserver::new(true);
    let observer = |result: &FetchResult| {
        if result.is_failure() {
            lines.lock().unwrap().push(logger.failure_line(result));
        }
    };

    let seeker = DeadSeeker::new(config_excluding(&["https://www.google.com"]));
    let results = seeker.seek([base.as_str()], Some(&observer)).await.unwrap();

    let mut lines = lines.into_inner().unwrap();
    lines.sort();
    assert_eq!(
        lines,
        vec![
            format!(
                "::error ::HttpResponseError: 404 - {0}/page3.html - found by navigating through: {0} -> {0}/page1.html",
                base
            ),
            format!(
                "::error ::HttpResponseError: 500 - {0}/page4.html - found by navigating through: {0} -> {0}/page2.html",
                base
            ),
        ]
    );

    let stats = CrawlStatistics::from_results(&results);
    assert_eq!(stats.total, 9);
    assert_eq!(stats.failures, 2);
}
