// src/checker/http.rs
// =============================================================================
// This module talks HTTP for the crawler.
//
// Key functionality:
// - HEAD requests to probe a URL (lightweight, no body download)
// - GET requests to download pages that we want to parse for links
// - Every status code (including 404 and 500) comes back as a response,
//   never as an error, so the crawler can record it
// - Transport failures (timeout, DNS, TLS...) are turned into short messages
//
// The crawler only sees the HttpClient trait. ReqwestClient is the real
// implementation; tests plug in an in-memory client instead.
// =============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

/// Follow at most this many redirects before giving up on a URL
const MAX_REDIRECTS: usize = 5;

/// User-Agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// What a HEAD probe tells us about a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// Where we ended up after following redirects
    pub final_url: String,
    /// HTTP status code of the final response
    pub status: u16,
    /// Content-Type header, if the server sent one
    pub content_type: Option<String>,
}

impl Probe {
    /// True when the Content-Type says this is an HTML document
    pub fn is_html(&self) -> bool {
        self.content_type.as_deref().is_some_and(|value| {
            let value = value.to_ascii_lowercase();
            value.contains("text/html") || value.contains("application/xhtml+xml")
        })
    }
}

// A downloaded page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub final_url: String,
    pub status: u16,
    pub body: String,
}

/// The HTTP capability the crawler needs.
///
/// Implementations must treat every status code as a normal response and
/// only return `Err` for transport failures.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn head(&self, url: &str) -> Result<Probe>;
    async fn get(&self, url: &str) -> Result<Page>;
}

// Settings for building the real HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Optional (username, password) sent as HTTP basic auth
    pub basic_auth: Option<(String, String)>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            basic_auth: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// `HttpClient` backed by reqwest.
///
/// The inner `Client` is cheap to clone and pools connections, so one
/// instance is shared by every crawl task.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    basic_auth: Option<(String, String)>,
}

impl ReqwestClient {
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            basic_auth: config.basic_auth,
        })
    }

    // Attaches basic auth credentials when they were configured
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.basic_auth {
            Some((user, password)) => request.basic_auth(user, Some(password)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        match self.authorize(request).send().await {
            Ok(response) => Ok(response),
            Err(e) => {
                let message = describe_error(&e);
                Err(anyhow::Error::new(e).context(message))
            }
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn head(&self, url: &str) -> Result<Probe> {
        let response = self.send(self.client.head(url)).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(Probe {
            final_url: response.url().to_string(),
            status: response.status().as_u16(),
            content_type,
        })
    }

    async fn get(&self, url: &str) -> Result<Page> {
        let response = self.send(self.client.get(url)).await?;
        let final_url = response.url().to_string();
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", final_url))?;

        Ok(Page {
            final_url,
            status,
            body,
        })
    }
}

// Turns a reqwest error into a short, human-readable reason
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
fn describe_error(error: &reqwest::Error) -> String {
    let error_string = error.to_string().to_lowercase();

    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(content_type: Option<&str>) -> Probe {
        Probe {
            final_url: "https://example.com/".to_string(),
            status: 200,
            content_type: content_type.map(str::to_string),
        }
    }

    #[test]
    fn test_html_content_types() {
        assert!(probe(Some("text/html")).is_html());
        assert!(probe(Some("text/html; charset=utf-8")).is_html());
        assert!(probe(Some("Text/HTML")).is_html());
        assert!(probe(Some("application/xhtml+xml")).is_html());
    }

    #[test]
    fn test_non_html_content_types() {
        assert!(!probe(Some("application/pdf")).is_html());
        assert!(!probe(Some("image/png")).is_html());
        assert!(!probe(None).is_html());
    }

    #[test]
    fn test_build_client_with_auth() {
        let config = ClientConfig {
            timeout: Duration::from_millis(500),
            basic_auth: Some(("user".to_string(), "secret".to_string())),
            ..ClientConfig::default()
        };
        let client = ReqwestClient::new(config).unwrap();
        assert!(client.basic_auth.is_some());
    }

    #[test]
    fn test_default_user_agent() {
        assert!(ClientConfig::default().user_agent.starts_with("linkcrawl/"));
    }
}
