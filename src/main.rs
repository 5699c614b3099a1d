// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout only carries the report)
// 3. Crawl the site
// 4. Print the report and exit
//
// Exit codes: 0 once the report is printed (even if some links are broken),
// 2 if the crawl could not start (bad URL, HTTP client setup failed).
// =============================================================================

use anyhow::Result;
use clap::Parser;
use linkcrawl::cli::Cli;
use linkcrawl::{Crawler, ReqwestClient, SnapshotWriter};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr; RUST_LOG overrides the --verbose default
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "linkcrawl=debug"
    } else {
        "linkcrawl=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let seed_url = cli.seed_url();
    let client = ReqwestClient::new(cli.client_config())
        .map_err(linkcrawl::CrawlError::from)?;

    let mut config = cli.crawl_config();
    if let Some(dir) = &cli.screenshots {
        info!(dir = %dir.display(), "Saving page snapshots");
        config = config.with_page_hook(Arc::new(SnapshotWriter::new(dir)));
    }

    let crawler = Crawler::new(&seed_url, Arc::new(client), config)?;

    if !cli.json {
        println!("🔍 Crawling website: {}\n", crawler.seed());
    }

    let report = crawler.run().await;
    report.print(cli.json)?;

    Ok(0)
}
