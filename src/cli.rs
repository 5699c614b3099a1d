// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Example:
//   linkcrawl https://example.com --concurrency 4 --interval 200
// =============================================================================

use crate::checker::ClientConfig;
use crate::crawl::CrawlConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "linkcrawl",
    version,
    about = "Crawl a website and report the status of every link on it",
    long_about = "linkcrawl starts at a URL, follows every link on the same host, and checks \
                  each page and outgoing link it finds. Broken links show up as failed \
                  entries in the final report."
)]
pub struct Cli {
    /// Website URL to crawl (e.g., https://example.com)
    ///
    /// "https://" is assumed when no scheme is given
    pub url: String,

    /// Username for HTTP basic auth
    #[arg(long, short = 'u')]
    pub user: Option<String>,

    /// Password for HTTP basic auth
    #[arg(long, short = 'p', env = "LINKCRAWL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, short = 't', default_value_t = 10_000)]
    pub timeout: u64,

    /// Milliseconds to wait before each request (0 = no wait)
    #[arg(long, short = 'i', default_value_t = 0)]
    pub interval: u64,

    /// Maximum number of URLs checked at the same time
    #[arg(
        long,
        short = 'c',
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub concurrency: u64,

    /// Save the HTML of every crawled page into this directory
    #[arg(long, short = 's', value_name = "DIR")]
    pub screenshots: Option<PathBuf>,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Log every request (debug level)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// The URL to start from, with a scheme added if it was missing
    pub fn seed_url(&self) -> String {
        let lower = self.url.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            self.url.clone()
        } else {
            format!("https://{}", self.url)
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        // A password without a user name still sends basic auth with an
        // empty user, which is what curl does too
        let basic_auth = match (&self.user, &self.password) {
            (None, None) => None,
            (user, password) => Some((
                user.clone().unwrap_or_default(),
                password.clone().unwrap_or_default(),
            )),
        };

        ClientConfig {
            timeout: Duration::from_millis(self.timeout),
            basic_auth,
            ..ClientConfig::default()
        }
    }

    /// Crawl settings without a page hook; main() adds one for --screenshots
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig::default()
            .with_interval(Duration::from_millis(self.interval))
            .with_concurrency(self.concurrency as usize)
    }
}
