// src/crawl/results.rs
// =============================================================================
// Per-URL outcomes of a crawl.
//
// Every URL a worker finishes with gets exactly one CrawlResult, keyed by
// the URL it finally resolved to. Results are written from many in-flight
// tasks and read once at the end, when the report is built.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

/// Either the HTTP status code we got back, or why we got nothing.
///
/// Serializes as a bare number or as the `"ERR: ..."` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Status {
    Code(u16),
    Error(String),
}

impl Status {
    pub fn error(message: impl fmt::Display) -> Self {
        Status::Error(format!("ERR: {}", message))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Code(code) => write!(f, "{}", code),
            Status::Error(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResult {
    /// The URL that was checked (after redirects)
    pub url: String,
    pub status: Status,
    /// True when the URL is on a different host than the seed
    pub is_external: bool,
}

impl CrawlResult {
    /// A URL passes when it answered with a status below 400
    pub fn is_ok(&self) -> bool {
        matches!(self.status, Status::Code(code) if code < 400)
    }
}

/// Thread-safe URL -> CrawlResult map shared by all crawl tasks.
#[derive(Debug, Default)]
pub struct Results {
    entries: Mutex<HashMap<String, CrawlResult>>,
}

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CrawlResult>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stores the result of a probe.
    ///
    /// Claiming guarantees one probe per URL, so an existing entry means the
    /// dedup logic let something through. The newer result is kept.
    pub fn record(&self, result: CrawlResult) {
        if let Some(previous) = self.lock().insert(result.url.clone(), result) {
            warn!(url = %previous.url, "URL was recorded twice");
        }
    }

    /// Stores a failure for `url`, replacing any probe result already
    /// recorded for it (a page whose download failed is reported broken).
    pub fn record_failure(&self, url: &str, status: Status) {
        self.lock().insert(
            url.to_string(),
            CrawlResult {
                url: url.to_string(),
                status,
                is_external: false,
            },
        );
    }

    pub fn get(&self, url: &str) -> Option<CrawlResult> {
        self.lock().get(url).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies every result out, sorted by URL
    pub fn sorted(&self) -> Vec<CrawlResult> {
        let mut results: Vec<_> = self.lock().values().cloned().collect();
        results.sort_by(|a, b| a.url.cmp(&b.url));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str, status: Status) -> CrawlResult {
        CrawlResult {
            url: url.to_string(),
            status,
            is_external: false,
        }
    }

    #[test]
    fn test_is_ok() {
        assert!(result("https://a.com/", Status::Code(200)).is_ok());
        assert!(result("https://a.com/", Status::Code(301)).is_ok());
        assert!(result("https://a.com/", Status::Code(399)).is_ok());
        assert!(!result("https://a.com/", Status::Code(400)).is_ok());
        assert!(!result("https://a.com/", Status::Code(404)).is_ok());
        assert!(!result("https://a.com/", Status::Code(500)).is_ok());
        assert!(!result("https://a.com/", Status::error("Request timed out")).is_ok());
    }

    #[test]
    fn test_error_marker() {
        let status = Status::error("Connection failed");
        assert_eq!(status, Status::Error("ERR: Connection failed".to_string()));
        assert_eq!(status.to_string(), "ERR: Connection failed");
        assert_eq!(Status::Code(404).to_string(), "404");
    }

    #[test]
    fn test_status_json() {
        let ok = serde_json::to_value(result("https://a.com/", Status::Code(200))).unwrap();
        assert_eq!(ok["status"], 200);

        let err = serde_json::to_value(result("https://a.com/", Status::error("boom"))).unwrap();
        assert_eq!(err["status"], "ERR: boom");
    }

    #[test]
    fn test_sorted_by_url() {
        let results = Results::new();
        results.record(result("https://example.com/b", Status::Code(200)));
        results.record(result("https://example.com/a", Status::Code(404)));
        results.record(result("https://example.com/", Status::Code(200)));

        let urls: Vec<_> = results.sorted().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/",
                "https://example.com/a",
                "https://example.com/b",
            ]
        );
    }

    #[test]
    fn test_failure_replaces_probe_result() {
        let results = Results::new();
        results.record(result("https://example.com/", Status::Code(200)));
        results.record_failure("https://example.com/", Status::error("Request timed out"));

        assert_eq!(results.len(), 1);
        let stored = results.get("https://example.com/").unwrap();
        assert_eq!(stored.status, Status::error("Request timed out"));
        assert!(!stored.is_external);
    }
}
