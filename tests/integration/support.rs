//! Shared helpers for the integration tests

use dead_seeker::SeekerConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration with quick retries
pub fn test_config() -> SeekerConfig {
    SeekerConfig {
        max_retries: 2,
        max_retry_time: 1,
        timeout: 5,
        agent: "DeadSeekerTest/1.0".to_string(),
        ..Default::default()
    }
}

/// An HTML page linking to the given addresses
pub fn html_page(links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|link| format!("<a href=\"{}\">{}</a>\n", link, link))
        .collect();
    ResponseTemplate::new(200)
        .set_body_raw(format!("<html><body>\n{}</body></html>", anchors), "text/html; charset=utf-8")
}

/// Serves a response to any method on `route`
pub async fn serve(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Serves a response to GET on `route`, expecting exactly `calls` requests
pub async fn serve_get_exactly(
    server: &MockServer,
    route: &str,
    response: ResponseTemplate,
    calls: u64,
) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(calls)
        .mount(server)
        .await;
}

/// Paths requested with the given method, in arrival order
pub async fn requested_paths(server: &MockServer, verb: &str) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.method.to_string() == verb)
        .map(|request| request.url.path().to_string())
        .collect()
}
