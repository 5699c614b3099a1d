// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Starts from a seed URL and follows links on the same host
// - Probes every link it finds, including links to other sites
// - Each URL is processed exactly once, even with many workers in flight
// - Configurable concurrency and a polite pause before each request
//
// Submodules:
// - frontier: the queue of pending URLs plus the set of claimed ones
// - results: per-URL outcomes
// - engine: the scheduler and the per-URL fetch logic
// =============================================================================

mod engine;
mod frontier;
mod results;

pub use engine::{CrawlConfig, Crawler};
pub use frontier::Frontier;
pub use results::{CrawlResult, Results, Status};
