// src/error.rs
// =============================================================================
// Errors that stop a crawl before it starts.
//
// Everything that goes wrong *during* a crawl (timeouts, 404s, bad HTML) is
// turned into a CrawlResult and shows up in the report. Only problems with
// the seed URL or with building the HTTP client are real errors, and those
// are defined here with thiserror so callers can match on them.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL could not be parsed as an absolute URL
    #[error("Invalid URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The seed URL parsed but has no host to compare links against
    #[error("URL has no host: {0}")]
    MissingHost(String),

    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
