//! Traversal, fetch strategy and transport behaviour of whole crawls

use crate::support::{html_page, requested_paths, serve, serve_get_exactly, test_config};
use dead_seeker::{DeadSeeker, FetchResult, SeekerConfig};
use reqwest::StatusCode;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A chain of pages: / -> /a.html -> /b.html -> /c.html
async fn chain_site() -> MockServer {
    let server = MockServer::start().await;
    serve(&server, "/", html_page(&["/a.html"])).await;
    serve(&server, "/a.html", html_page(&["/b.html"])).await;
    serve(&server, "/b.html", html_page(&["/c.html"])).await;
    serve(&server, "/c.html", html_page(&[])).await;
    server
}

fn with_depth(depth: i64) -> SeekerConfig {
    SeekerConfig {
        max_depth: depth,
        ..test_config()
    }
}

async fn crawled_paths(server: &MockServer, config: SeekerConfig) -> Vec<String> {
    let seed = format!("{}/", server.uri());
    let results = DeadSeeker::new(config).seek([seed], None).await.unwrap();
    assert!(results.is_healthy());

    let mut paths: Vec<String> = results
        .successes
        .iter()
        .map(|r| r.url().trim_start_matches(&server.uri()).to_string())
        .collect();
    paths.sort();
    paths
}

#[tokio::test]
async fn test_depth_zero_fetches_only_seeds() {
    let server = chain_site().await;
    assert_eq!(crawled_paths(&server, with_depth(0)).await, vec!["/"]);
}

#[tokio::test]
async fn test_depth_limits_hops() {
    let server = chain_site().await;
    assert_eq!(crawled_paths(&server, with_depth(1)).await, vec!["/", "/a.html"]);

    let server = chain_site().await;
    assert_eq!(
        crawled_paths(&server, with_depth(2)).await,
        vec!["/", "/a.html", "/b.html"]
    );
}

#[tokio::test]
async fn test_unlimited_depth_reaches_everything() {
    let server = chain_site().await;
    assert_eq!(
        crawled_paths(&server, with_depth(-1)).await,
        vec!["/", "/a.html", "/b.html", "/c.html"]
    );
}

#[tokio::test]
async fn test_relative_link_is_fetched_exactly_once() {
    let server = MockServer::start().await;
    serve(&server, "/page1.html", html_page(&["/page2.html", "page2.html", "/page2.html"])).await;
    serve_get_exactly(&server, "/page2.html", html_page(&["/page1.html"]), 1).await;

    let config = SeekerConfig {
        always_get_onsite: true,
        ..test_config()
    };
    let seed = format!("{}/page1.html", server.uri());
    let results = DeadSeeker::new(config).seek([seed], None).await.unwrap();

    assert_eq!(results.total(), 2);
    let page2 = results
        .successes
        .iter()
        .find(|r| r.url().ends_with("/page2.html"))
        .unwrap();
    assert_eq!(page2.url(), format!("{}/page2.html", server.uri()));
    assert_eq!(page2.target.parent_urls(), vec![format!("{}/page1.html", server.uri())]);
}

#[tokio::test]
async fn test_no_address_is_fetched_twice() {
    let server = MockServer::start().await;
    serve(&server, "/", html_page(&["/a.html", "/b.html", "/"])).await;
    serve(&server, "/a.html", html_page(&["/b.html", "/", "/a.html"])).await;
    serve(&server, "/b.html", html_page(&["/a.html", "/"])).await;

    let config = SeekerConfig {
        always_get_onsite: true,
        ..test_config()
    };
    let seed = format!("{}/", server.uri());
    let results = DeadSeeker::new(config).seek([seed], None).await.unwrap();
    assert_eq!(results.total(), 3);

    let paths = requested_paths(&server, "GET").await;
    let unique: HashSet<&String> = paths.iter().collect();
    assert_eq!(paths.len(), 3);
    assert_eq!(unique.len(), 3);
    assert!(requested_paths(&server, "HEAD").await.is_empty());
}

#[tokio::test]
async fn test_observer_is_called_for_every_result() {
    let server = MockServer::start().await;
    serve(&server, "/", html_page(&["/a.html", "/broken.html"])).await;
    serve(&server, "/a.html", html_page(&["/b.html"])).await;
    serve(&server, "/b.html", html_page(&["/", "/broken.html"])).await;
    serve(&server, "/broken.html", ResponseTemplate::new(404)).await;

    let calls = AtomicUsize::new(0);
    let observer = |_: &FetchResult| {
        calls.fetch_add(1, Ordering::SeqCst);
    };

    let seed = format!("{}/", server.uri());
    let results = DeadSeeker::new(test_config())
        .seek([seed], Some(&observer))
        .await
        .unwrap();

    assert_eq!(results.total(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(results.failures.len(), 1);
}

#[tokio::test]
async fn test_head_not_allowed_site() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;
    serve_get_exactly(&server, "/", html_page(&["/next.html"]), 1).await;
    serve_get_exactly(&server, "/next.html", html_page(&[]), 1).await;

    let seed = format!("{}/", server.uri());
    let results = DeadSeeker::new(test_config()).seek([seed], None).await.unwrap();

    assert!(results.is_healthy());
    assert_eq!(results.total(), 2);
    assert!(results
        .successes
        .iter()
        .all(|r| r.status == Some(StatusCode::OK)));
}

#[tokio::test]
async fn test_unreachable_link_is_a_failure() {
    let server = MockServer::start().await;
    serve(&server, "/", html_page(&["http://127.0.0.1:1/gone"])).await;

    let config = SeekerConfig {
        max_retries: 1,
        ..test_config()
    };
    let seed = format!("{}/", server.uri());
    let results = DeadSeeker::new(config).seek([seed.clone()], None).await.unwrap();

    assert_eq!(results.failures.len(), 1);
    let failure = &results.failures[0];
    assert_eq!(failure.url(), "http://127.0.0.1:1/gone");
    assert_eq!(failure.status, None);
    assert_eq!(failure.error.as_ref().map(|e| e.kind()), Some("TransportError"));
    assert_eq!(failure.target.parent_urls(), vec![seed.as_str()]);
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(path("/flaky.html"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let config = SeekerConfig {
        max_retries: 3,
        max_retry_time: 5,
        ..test_config()
    };
    let results = DeadSeeker::new(config)
        .seek([format!("{}/flaky.html", server.uri())], None)
        .await
        .unwrap();

    assert_eq!(results.failures.len(), 1);
    assert_eq!(results.failures[0].status, Some(StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn test_global_concurrency_cap_serializes_requests() {
    let server = MockServer::start().await;
    let links = ["/1.html", "/2.html", "/3.html", "/4.html"];
    serve(&server, "/", html_page(&links)).await;
    for link in links {
        serve(
            &server,
            link,
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_delay(Duration::from_millis(200)),
        )
        .await;
    }

    let config = SeekerConfig {
        max_concurrent_requests: 1,
        ..test_config()
    };
    let seed = format!("{}/", server.uri());
    let started = Instant::now();
    let results = DeadSeeker::new(config).seek([seed], None).await.unwrap();

    assert_eq!(results.total(), 5);
    assert!(results.is_healthy());
    assert!(started.elapsed() >= Duration::from_millis(800));
}
