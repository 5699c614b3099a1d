// src/lib.rs
// =============================================================================
// linkcrawl as a library.
//
// The binary in main.rs is a thin wrapper around these modules. Using the
// library directly looks like this:
//
//   let client = Arc::new(ReqwestClient::new(ClientConfig::default())?);
//   let crawler = Crawler::new("https://example.com", client, CrawlConfig::default())?;
//   let report = crawler.run().await;
//   println!("{}", report.to_table());
// =============================================================================

pub mod checker;
pub mod cli;
pub mod crawl;
pub mod error;
pub mod report;
pub mod snapshot;

pub use checker::{ClientConfig, HttpClient, ReqwestClient};
pub use crawl::{CrawlConfig, CrawlResult, Crawler, Status};
pub use error::CrawlError;
pub use report::Report;
pub use snapshot::{NoopHook, PageHook, SnapshotWriter};
