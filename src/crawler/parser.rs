//! HTML link extraction
//!
//! Every start tag of a page is scanned for the configured link-bearing
//! attributes (`href` and `src` by default). Values come back in document
//! order and are not deduplicated.

use crate::config::SeekerConfig;
use crate::state::FetchResult;
use crate::url::{resolve_link, LinkAcceptor};
use scraper::{ElementRef, Html};

/// Extracts the links of a page that the acceptor lets through
#[derive(Debug, Clone)]
pub struct LinkParser {
    /// Attribute names to scan, lowercased
    attrs: Vec<String>,
    acceptor: LinkAcceptor,

    /// Resolve links against the page address before filtering
    resolve_before_filter: bool,
}

impl LinkParser {
    pub fn new(config: &SeekerConfig, acceptor: LinkAcceptor) -> Self {
        Self {
            attrs: config
                .search_attrs
                .iter()
                .map(|attr| attr.trim().to_ascii_lowercase())
                .collect(),
            acceptor,
            resolve_before_filter: config.resolve_before_filter,
        }
    }

    /// Returns the accepted links of a fetched page
    ///
    /// A result without HTML yields no links.
    pub fn parse(&self, result: &FetchResult) -> Vec<String> {
        match &result.html {
            Some(html) => self.parse_html(html, result.url()),
            None => Vec::new(),
        }
    }

    /// Returns the accepted links of an HTML document
    ///
    /// # Arguments
    ///
    /// * `html` - The document to scan
    /// * `page_url` - Address of the document, used when links are resolved
    ///   before filtering
    ///
    /// # Returns
    ///
    /// Raw attribute values, or absolute addresses when resolving before
    /// filtering is enabled. Links that cannot be resolved are dropped.
    pub fn parse_html(&self, html: &str, page_url: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let mut links = Vec::new();

        for element in document.root_element().descendants().filter_map(ElementRef::wrap) {
            for (name, value) in element.value().attrs() {
                if !self.attrs.iter().any(|attr| attr == name) {
                    continue;
                }

                let value = value.trim();
                let candidate = if self.resolve_before_filter {
                    match resolve_link(page_url, value) {
                        Some(resolved) => resolved,
                        None => continue,
                    }
                } else {
                    value.to_string()
                };

                if self.acceptor.accepts(&candidate) {
                    links.push(candidate);
                } else {
                    tracing::trace!("Rejected link {} on {}", candidate, page_url);
                }
            }
        }

        links
    }
}
