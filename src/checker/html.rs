// src/checker/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Every <a href> is resolved against the URL of the page it came from,
// the #fragment is dropped, and links are split into ones on the crawled
// host (internal) and everything else (external). Results are kept in
// BTreeSets so the same page always yields the same links in the same order.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::BTreeSet;
use tracing::debug;
use url::Url;

// Links found on a single page, deduplicated and fragment-free
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageLinks {
    /// Links whose host is the crawled host
    pub internal: BTreeSet<String>,
    /// HTTP/HTTPS links pointing anywhere else
    pub external: BTreeSet<String>,
}

impl PageLinks {
    /// All links, internal first, each group in sorted order
    pub fn into_all(self) -> impl Iterator<Item = String> {
        self.internal.into_iter().chain(self.external)
    }
}

// Extracts the same-host links from a page
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the final URL of the page (for resolving relative links)
//   base_host: the host we are crawling
//
// Example:
//   html = "<a href='/docs#intro'>Docs</a>"
//   page_url = "https://example.com/page"
//   result = ["https://example.com/docs"]
pub fn extract_links(html: &str, page_url: &Url, base_host: &str) -> Vec<String> {
    extract_page_links(html, page_url, base_host)
        .internal
        .into_iter()
        .collect()
}

// Extracts every checkable link from a page, split by host
pub fn extract_page_links(html: &str, page_url: &Url, base_host: &str) -> PageLinks {
    let mut links = PageLinks::default();

    let document = Html::parse_document(html);

    // Our selector is a constant and known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(url) = resolve_url(page_url, href) else {
            continue;
        };

        if !is_checkable_link(&url) {
            continue;
        }

        if url.host_str() == Some(base_host) {
            links.internal.insert(url.into());
        } else {
            links.external.insert(url.into());
        }
    }

    links
}

// Resolves a possibly-relative href to an absolute URL without a fragment
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"               -> Some("https://example.com/docs")
//   href = "../other#top"        -> Some("https://example.com/other")
//   href = "https://other.com"   -> Some("https://other.com/")
//   href = "http://[broken"      -> None (logged at debug level)
fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    // Pure in-page anchors and non-navigational schemes are not links
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    match base.join(href) {
        Ok(mut url) => {
            url.set_fragment(None);
            Some(url)
        }
        Err(e) => {
            debug!(page = %base, href, error = %e, "Skipping unresolvable link");
            None
        }
    }
}

// Only HTTP and HTTPS links can be probed
fn is_checkable_link(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
