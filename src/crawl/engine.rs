// src/crawl/engine.rs
// =============================================================================
// The crawl engine: a bounded pool of in-flight tasks draining the frontier.
//
// How it works:
// 1. The seed URL starts in the frontier queue
// 2. The scheduler fills free worker slots (up to `concurrency`) with URLs
//    popped from the queue, claiming each one before starting it
// 3. Each task waits `interval`, HEADs its URL, records the result, and for
//    internal 200 HTML pages GETs the body and queues the links it finds
// 4. Whenever a task finishes the scheduler refills the free slots
// 5. When the queue is empty and no task is running, the crawl is over
//
// All tasks are polled by the one future returned from run(), so they
// overlap on network I/O without running on separate threads. The in-flight
// set is owned by that future alone, which is what makes "queue empty and
// nothing running" a single, final check.
// =============================================================================

use crate::checker::{extract_page_links, HttpClient};
use crate::crawl::frontier::Frontier;
use crate::crawl::results::{CrawlResult, Results, Status};
use crate::error::CrawlError;
use crate::report::Report;
use crate::snapshot::{NoopHook, PageHook};
use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

// How a crawl behaves
#[derive(Clone)]
pub struct CrawlConfig {
    /// Pause before each task's first request (zero = no pause)
    pub interval: Duration,
    /// Maximum number of URLs being processed at the same time
    pub concurrency: usize,
    /// Called with the HTML of every internal page that gets downloaded
    pub page_hook: Arc<dyn PageHook>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            interval: Duration::ZERO,
            concurrency: 1,
            page_hook: Arc::new(NoopHook),
        }
    }
}

impl fmt::Debug for CrawlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrawlConfig")
            .field("interval", &self.interval)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl CrawlConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_page_hook(mut self, hook: Arc<dyn PageHook>) -> Self {
        self.page_hook = hook;
        self
    }
}

pub struct Crawler {
    client: Arc<dyn HttpClient>,
    seed: Url,
    /// Host of the seed URL; links elsewhere are external
    base_host: String,
    interval: Duration,
    concurrency: usize,
    page_hook: Arc<dyn PageHook>,
    frontier: Frontier,
    results: Results,
}

impl Crawler {
    /// Creates a crawler with `seed_url` queued.
    ///
    /// Fails if the seed is not an absolute URL with a host.
    pub fn new(
        seed_url: &str,
        client: Arc<dyn HttpClient>,
        config: CrawlConfig,
    ) -> Result<Self, CrawlError> {
        let mut seed = Url::parse(seed_url).map_err(|source| CrawlError::InvalidSeed {
            url: seed_url.to_string(),
            source,
        })?;
        seed.set_fragment(None);

        let base_host = seed
            .host_str()
            .ok_or_else(|| CrawlError::MissingHost(seed_url.to_string()))?
            .to_string();

        let frontier = Frontier::new();
        frontier.enqueue(seed.as_str());

        Ok(Self {
            client,
            seed,
            base_host,
            interval: config.interval,
            concurrency: config.concurrency.max(1),
            page_hook: config.page_hook,
            frontier,
            results: Results::new(),
        })
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    pub fn base_host(&self) -> &str {
        &self.base_host
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Queues an extra URL to check alongside the seed
    pub fn enqueue(&self, url: impl Into<String>) {
        self.frontier.enqueue(url);
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn results(&self) -> &Results {
        &self.results
    }

    /// Runs the crawl until every queued URL has been processed.
    ///
    /// Individual URL failures end up in the report; this never fails.
    pub async fn run(&self) -> Report {
        info!(seed = %self.seed, concurrency = self.concurrency, "Starting crawl");

        let mut in_flight = FuturesUnordered::new();

        loop {
            // Fill every free slot from the queue
            while in_flight.len() < self.concurrency {
                let Some(url) = self.frontier.dequeue() else {
                    break;
                };

                if !self.frontier.claim(&url) {
                    debug!(url = %url, "Already claimed, skipping");
                    continue;
                }

                in_flight.push(self.process(url));
            }

            // Nothing running and nothing left to start
            if in_flight.next().await.is_none() {
                break;
            }
        }

        let report = Report::new(self.results.sorted());
        info!(
            total = report.len(),
            ok = report.ok_count(),
            failed = report.failed_count(),
            "Crawl finished"
        );
        report
    }

    // One task: never fails, every error becomes a result
    async fn process(&self, url: String) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }

        if let Err(e) = self.fetch(&url).await {
            error!(url = %url, error = %format!("{:#}", e), "Failed to crawl");
            self.results.record_failure(&url, Status::error(&e));
        }
    }

    async fn fetch(&self, url: &str) -> Result<()> {
        let probe = self.client.head(url).await?;

        let mut final_url = Url::parse(&probe.final_url)
            .with_context(|| format!("Invalid final URL '{}'", probe.final_url))?;
        final_url.set_fragment(None);

        // A redirect target is a URL of its own and must be claimed as well
        if final_url.as_str() != url && !self.frontier.claim(final_url.as_str()) {
            debug!(url, redirect = %final_url, "Redirect target already claimed");
            return Ok(());
        }

        let is_external = final_url.host_str() != Some(self.base_host.as_str());

        self.results.record(CrawlResult {
            url: final_url.to_string(),
            status: Status::Code(probe.status),
            is_external,
        });

        if probe.status >= 400 {
            error!(
                url = %final_url,
                status = probe.status,
                "HTTP {} for {}",
                probe.status,
                final_url
            );
        } else {
            info!(url = %final_url, status = probe.status, external = is_external, "Checked");
        }

        // Only internal HTML pages that answered 200 are downloaded
        if is_external || probe.status != 200 || !probe.is_html() {
            return Ok(());
        }

        // From here on the result belongs to final_url, so a failure replaces it
        if let Err(e) = self.expand(&final_url).await {
            error!(url = %final_url, error = %format!("{:#}", e), "Failed to download page");
            self.results.record_failure(final_url.as_str(), Status::error(&e));
        }

        Ok(())
    }

    // Downloads a qualifying page and queues the links on it
    async fn expand(&self, page_url: &Url) -> Result<()> {
        let page = self.client.get(page_url.as_str()).await?;

        if page.status != 200 {
            debug!(url = %page_url, status = page.status, "Page changed status, not parsing");
            return Ok(());
        }

        // Relative links resolve against wherever the GET ended up
        let mut base = Url::parse(&page.final_url)
            .with_context(|| format!("Invalid final URL '{}'", page.final_url))?;
        base.set_fragment(None);

        self.page_hook.capture(page_url.as_str(), &page.body).await;

        let links = extract_page_links(&page.body, &base, &self.base_host);
        let found = links.internal.len() + links.external.len();
        let queued = self.frontier.enqueue_unvisited(links.into_all());
        debug!(url = %page_url, found, queued, "Extracted links");

        Ok(())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is FuturesUnordered?
//    - A collection of futures that are all polled together
//    - .next().await yields whichever one finishes first
//    - It returns None only when the collection is empty, which is exactly
//      "no task is running" for us
//
// 2. Why not tokio::spawn?
//    - Spawned tasks need 'static data, so everything would need an Arc
//    - Our tasks just borrow &self; they live inside run()'s future
//    - The work is network-bound, so one thread juggling many requests is
//      enough
//
// 3. Why claim before pushing the task?
//    - The same URL can be queued several times (discovered on many pages)
//    - claim() happens before any .await, so no other task can slip in
//      between the check and the insert
// -----------------------------------------------------------------------------
