//! URL handling module for Dead-Seeker
//!
//! This module provides link acceptance rules and resolution of links found
//! on a page against that page's address.

mod acceptor;

use url::Url;

// Re-export main types
pub use acceptor::{LinkAcceptor, LinkAcceptorBuilder, LinkRule, MatchKind};

/// Resolves a link against the address of the page it was found on
///
/// Absolute links come back in their parsed (serialized) form; relative,
/// protocol-relative and path-relative links are joined onto `base`.
///
/// # Returns
///
/// * `Some(String)` - The absolute address
/// * `None` - `base` is not an absolute URL or the link cannot be joined
///
/// # Examples
///
/// ```
/// use dead_seeker::url::resolve_link;
///
/// assert_eq!(
///     resolve_link("http://localhost:8080/page1.html", "/page2.html").as_deref(),
///     Some("http://localhost:8080/page2.html")
/// );
/// assert_eq!(
///     resolve_link("https://example.com/docs/a.html", "../b.html").as_deref(),
///     Some("https://example.com/b.html")
/// );
/// ```
pub fn resolve_link(base: &str, link: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    match base.join(link.trim()) {
        Ok(resolved) => Some(resolved.into()),
        Err(e) => {
            tracing::debug!("Failed to resolve {} against {}: {}", link, base, e);
            None
        }
    }
}

/// Returns true if a Content-Type value describes HTML
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("html")
}
